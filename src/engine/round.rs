use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::deck::Deck;
use crate::domain::table::{CardHandle, Table};
use crate::engine::errors::RoundError;
use crate::engine::round_history::{RoundEventKind, RoundHistory};
use crate::engine::turn::{TurnSlot, TurnTicket};
use crate::engine::{CardMarker, Collaborators, Sound};
use crate::eval::rules::Rules;
use crate::time_ctrl::PacingRules;

/// Что произошло после клика по карте.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Ввод заблокирован (раунд закончен) или карты нет на столе.
    Ignored,
    /// Хода нет - клик отвергнут.
    Rejected,
    Selected,
    Deselected,
    /// Набрано K карт и они оценены.
    Evaluated { is_set: bool, game_over: bool },
}

/// Один раунд: колода, открытые карты, текущий выбор и не более одного хода.
pub struct Round {
    rules: Rules,
    pacing: PacingRules,
    deck: Deck,
    table: Table,
    selection: Vec<Card>,
    turn: TurnSlot,
    started: bool,
    terminated: bool,
    accept_user_input: bool,
    running: bool,
    game_over: bool,
    hint_index: usize,
    history: RoundHistory,
}

impl Round {
    /// Новый раунд: полная колода под `rules`, сразу перемешанная.
    pub fn new(rules: Rules, pacing: PacingRules, ctx: &mut Collaborators) -> Self {
        let mut deck = Deck::create(rules.num_features, rules.num_variations);
        deck.shuffle(ctx.rng.as_mut());
        Self {
            rules,
            pacing,
            deck,
            table: Table::new(rules.num_variations),
            selection: Vec::new(),
            turn: TurnSlot::new(),
            started: false,
            terminated: false,
            accept_user_input: true,
            running: true,
            game_over: false,
            hint_index: 0,
            history: RoundHistory::new(),
        }
    }

    /// Сдать стартовые `F * V` карт, затем докладывать по `V`, пока на столе нет сета.
    ///
    /// Повторный вызов - ошибка.
    pub fn start(&mut self, ctx: &mut Collaborators) -> Result<(), RoundError> {
        if self.terminated {
            return Err(RoundError::Terminated);
        }
        if self.started {
            return Err(RoundError::AlreadyStarted);
        }
        self.started = true;
        self.history.push(RoundEventKind::RoundStarted {
            deck_size: self.deck.len(),
            num_variations: self.rules.num_variations,
        });

        self.deal_cards(self.rules.opening_hand(), ctx)?;
        while !self.has_sets() {
            if self.deck.available() < self.rules.set_size() {
                self.finish_game();
                break;
            }
            self.deal_cards(self.rules.set_size(), ctx)?;
        }
        info!(
            "round started: {} cards on table, {} in deck",
            self.table.len(),
            self.deck.available()
        );
        Ok(())
    }

    /// Открыть ход. Пока ход открыт, второй открыть нельзя.
    pub fn wait_for_turn_complete(&mut self) -> Result<TurnTicket, RoundError> {
        if self.terminated {
            return Err(RoundError::Terminated);
        }
        if !self.started {
            return Err(RoundError::NotStarted);
        }
        self.turn.open()
    }

    /// Отменить ход без оценки: снять выбор и завершить ход с `game_over = false`.
    pub fn cancel_turn(&mut self, ctx: &mut Collaborators) {
        if !self.selection.is_empty() {
            self.deselect_all(ctx);
        }
        if let Some(turn) = self.turn.take() {
            self.clear_hints(ctx);
            ctx.play(Sound::Cancel);
            self.history.push(RoundEventKind::TurnCancelled);
            turn.complete(false);
        }
    }

    /// Клик по карте на столе.
    pub fn click_card(
        &mut self,
        card: &Card,
        ctx: &mut Collaborators,
    ) -> Result<ClickOutcome, RoundError> {
        if !self.accept_user_input || !self.table.contains(card) {
            return Ok(ClickOutcome::Ignored);
        }
        // Пока клик обрабатывается, новые клики не принимаем.
        self.accept_user_input = false;
        let outcome = self.process_card_click(card, ctx);
        if self.running {
            self.accept_user_input = true;
        }
        outcome
    }

    /// Клик мимо карт: снять весь выбор.
    pub fn click_background(&mut self, ctx: &mut Collaborators) {
        if self.accept_user_input {
            self.deselect_all(ctx);
        }
    }

    /// Пометить подсказкой первую карту первого найденного сета.
    pub fn show_hint(&mut self, ctx: &mut Collaborators) -> Option<Card> {
        let sets = self.find_sets();
        let Some(first) = sets.first().and_then(|set| set.first()).cloned() else {
            warn!("No set available?");
            return None;
        };
        if let Some(handle) = self.table.handle_of(&first) {
            ctx.renderer.set_marker(handle, CardMarker::Hint, true);
        }
        self.history.push(RoundEventKind::HintShown {
            cards: vec![first.clone()],
        });
        Some(first)
    }

    /// Подсветить целиком следующий сет (по кругу по всем найденным).
    /// Пометки снимаются, когда ход завершается или отменяется.
    pub fn cycle_hint(&mut self, ctx: &mut Collaborators) -> Option<Vec<Card>> {
        if !self.accept_user_input {
            return None;
        }
        let sets = self.find_sets();
        if sets.is_empty() {
            return None;
        }
        self.clear_hints(ctx);
        let chosen = sets[self.hint_index % sets.len()].clone();
        self.hint_index += 1;
        for card in &chosen {
            if let Some(handle) = self.table.handle_of(card) {
                ctx.renderer.set_marker(handle, CardMarker::Hint, true);
            }
        }
        self.history.push(RoundEventKind::HintShown {
            cards: chosen.clone(),
        });
        Some(chosen)
    }

    /// Сыграть первый найденный сет обычными кликами.
    /// Возвращает исход последнего клика (`None`, если сетов нет).
    pub fn auto_solve(
        &mut self,
        ctx: &mut Collaborators,
    ) -> Result<Option<ClickOutcome>, RoundError> {
        if !self.accept_user_input {
            return Ok(None);
        }
        let Some(set) = self.find_sets().into_iter().next() else {
            return Ok(None);
        };
        self.deselect_all(ctx);
        let mut last = None;
        for card in &set {
            ctx.pacer.wait_frames(self.pacing.auto_click_frames);
            let outcome = self.click_card(card, ctx)?;
            last = Some(outcome);
            if matches!(outcome, ClickOutcome::Rejected | ClickOutcome::Ignored) {
                break;
            }
        }
        Ok(last)
    }

    /// Закрыть раунд: убрать все карты. Нельзя, пока открыт ход.
    pub fn terminate(&mut self, ctx: &mut Collaborators) -> Result<(), RoundError> {
        if !self.turn.is_empty() {
            return Err(RoundError::TurnOutstanding);
        }
        self.selection.clear();
        for handle in self.table.clear() {
            ctx.renderer.discard(handle);
        }
        self.terminated = true;
        self.running = false;
        self.accept_user_input = false;
        debug!("round terminated");
        Ok(())
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Сколько карт осталось в колоде.
    pub fn available(&self) -> usize {
        self.deck.available()
    }

    pub fn cards_on_table(&self) -> usize {
        self.table.len()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn selection(&self) -> &[Card] {
        &self.selection
    }

    pub fn has_turn(&self) -> bool {
        !self.turn.is_empty()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn accepts_input(&self) -> bool {
        self.accept_user_input
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    pub fn find_sets(&self) -> Vec<Vec<Card>> {
        self.rules.find_sets(&self.table.cards())
    }

    pub fn has_sets(&self) -> bool {
        self.rules.has_set(&self.table.cards())
    }

    fn process_card_click(
        &mut self,
        card: &Card,
        ctx: &mut Collaborators,
    ) -> Result<ClickOutcome, RoundError> {
        if self.turn.is_empty() {
            ctx.play(Sound::Reject);
            return Ok(ClickOutcome::Rejected);
        }
        ctx.play(Sound::Click);

        if self.selection.contains(card) {
            self.deselect_card(card, ctx);
            return Ok(ClickOutcome::Deselected);
        }
        self.select_card(card, ctx);
        if self.selection.len() < self.rules.set_size() {
            return Ok(ClickOutcome::Selected);
        }

        let is_set = self.rules.is_set(&self.selection);
        self.turn.selection_complete(is_set);

        if is_set {
            ctx.play(Sound::Success);
            let found = std::mem::take(&mut self.selection);
            self.history.push(RoundEventKind::SetFound {
                cards: found.clone(),
            });
            self.remove_set(&found, ctx);
            ctx.pacer.wait_frame();
            self.replenish(ctx)?;
        } else {
            let invalid = self.selection.clone();
            self.deselect_all(ctx);
            ctx.play(Sound::Failure);
            self.show_invalid(&invalid, ctx);
            self.history.push(RoundEventKind::WrongClaim { cards: invalid });
        }

        // Подсказка живёт до конца хода.
        self.clear_hints(ctx);
        let game_over = self.game_over;
        if let Some(turn) = self.turn.take() {
            turn.complete(game_over);
        }
        Ok(ClickOutcome::Evaluated { is_set, game_over })
    }

    /// После уборки сета: если на столе есть сет и карт не меньше стартовых -
    /// только выровнять ряды. Иначе докладывать по `V`, пока не появится сет
    /// или не кончится колода.
    fn replenish(&mut self, ctx: &mut Collaborators) -> Result<(), RoundError> {
        let mut ready = self.has_sets() && self.table.len() >= self.rules.opening_hand();
        if ready {
            self.table.rebalance();
            return Ok(());
        }
        loop {
            let has_more_cards = self.deck.available() >= self.rules.set_size();
            if has_more_cards {
                self.deal_cards(self.rules.set_size(), ctx)?;
            }
            ready = self.has_sets();
            if ready || !has_more_cards {
                break;
            }
        }
        if !ready {
            self.finish_game();
        }
        Ok(())
    }

    fn finish_game(&mut self) {
        info!(
            "GAME OVER available: {}, on table: {}",
            self.deck.available(),
            self.table.len()
        );
        self.history.push(RoundEventKind::GameOver {
            cards_left: self.deck.available(),
            on_table: self.table.len(),
        });
        self.game_over = true;
        self.accept_user_input = false;
        self.running = false;
    }

    fn deal_cards(&mut self, count: usize, ctx: &mut Collaborators) -> Result<(), RoundError> {
        let cards = self.deck.take(count)?;
        let mut handles = Vec::with_capacity(cards.len());
        for card in &cards {
            let handle = ctx.renderer.render(card);
            self.table.place(card.clone(), handle);
            handles.push(handle);
        }
        ctx.play(Sound::Appearance);
        for handle in handles {
            let deal = self.pacing.deal_frames;
            let frames = ctx.rng.next_in_range(deal.min, deal.max);
            ctx.pacer.wait_frames(frames);
            ctx.renderer.set_marker(handle, CardMarker::Appearing, true);
            ctx.pacer.wait_for_animation(handle);
            ctx.play(Sound::Docked);
            ctx.renderer.set_marker(handle, CardMarker::Appearing, false);
        }
        self.history.push(RoundEventKind::CardsDealt { cards });
        Ok(())
    }

    fn remove_set(&mut self, cards: &[Card], ctx: &mut Collaborators) {
        let mut removed: Vec<CardHandle> = Vec::with_capacity(cards.len());
        let mut placeholders: Vec<CardHandle> = Vec::with_capacity(cards.len());
        for card in cards {
            let Some(handle) = self.table.remove(card) else {
                continue;
            };
            placeholders.push(ctx.renderer.render_placeholder());
            ctx.renderer.set_marker(handle, CardMarker::Selected, false);
            ctx.renderer.set_marker(handle, CardMarker::Solved, true);
            removed.push(handle);
            let remove = self.pacing.remove_frames;
            let frames = ctx.rng.next_in_range(remove.min, remove.max);
            ctx.pacer.wait_frames(frames);
        }
        for handle in removed {
            ctx.pacer.wait_for_animation(handle);
            ctx.renderer.discard(handle);
        }
        ctx.play(Sound::Fly);
        for placeholder in placeholders {
            ctx.renderer.discard(placeholder);
        }
        ctx.pacer.wait_frames(self.pacing.settle_frames);
    }

    fn select_card(&mut self, card: &Card, ctx: &mut Collaborators) {
        debug_assert!(!self.selection.contains(card));
        self.selection.push(card.clone());
        if let Some(handle) = self.table.handle_of(card) {
            ctx.renderer.set_marker(handle, CardMarker::Selected, true);
        }
    }

    fn deselect_card(&mut self, card: &Card, ctx: &mut Collaborators) {
        self.selection.retain(|c| c != card);
        if let Some(handle) = self.table.handle_of(card) {
            ctx.renderer.set_marker(handle, CardMarker::Selected, false);
        }
    }

    fn deselect_all(&mut self, ctx: &mut Collaborators) {
        while let Some(card) = self.selection.pop() {
            if let Some(handle) = self.table.handle_of(&card) {
                ctx.pacer.wait_for_animation(handle);
                ctx.renderer.set_marker(handle, CardMarker::Selected, false);
            }
        }
    }

    fn clear_hints(&self, ctx: &mut Collaborators) {
        for entry in self.table.entries() {
            ctx.renderer.set_marker(entry.handle, CardMarker::Hint, false);
        }
    }

    fn show_invalid(&mut self, cards: &[Card], ctx: &mut Collaborators) {
        let handles: Vec<CardHandle> = cards
            .iter()
            .filter_map(|card| self.table.handle_of(card))
            .collect();
        for &handle in &handles {
            ctx.renderer.set_marker(handle, CardMarker::Invalid, true);
        }
        for &handle in &handles {
            ctx.pacer.wait_for_animation(handle);
            ctx.renderer.set_marker(handle, CardMarker::Invalid, false);
        }
    }
}
