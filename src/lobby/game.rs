use log::debug;

use crate::domain::card::Card;
use crate::domain::difficulty::Difficulty;
use crate::domain::player::{Player, PlayerCapability, PlayerState};
use crate::domain::PlayerId;
use crate::engine::{ClickOutcome, Collaborators, Round, Sound};
use crate::infra::config::GameConfig;
use crate::lobby::errors::GameError;
use crate::lobby::states::{
    GameOverPhase, GamePhase, GameState, Search, Selection, StartPhase,
};
use crate::time_ctrl::{Countdown, CountdownEvent, DecayEvent, ScoreDecay};

/// Всё, что нужно состояниям игры: конфиг, соавторы, игроки, текущий раунд.
pub struct GameContext<P> {
    pub config: GameConfig,
    pub collaborators: Collaborators,
    pub players: Vec<P>,
    pub difficulty: Difficulty,
    pub round: Option<Round>,
}

impl<P: PlayerCapability> GameContext<P> {
    /// Размер колоды при выбранной сложности.
    pub fn deck_size(&self) -> usize {
        self.difficulty.deck_size(self.config.num_features)
    }

    fn cards_left(&self) -> usize {
        self.round
            .as_ref()
            .map_or_else(|| self.deck_size(), Round::available)
    }
}

/// Игра: контекст + ровно одно активное состояние.
pub struct Game<P: PlayerCapability = Player> {
    context: GameContext<P>,
    state: GameState,
}

impl<P: PlayerCapability> Game<P> {
    /// Создать игру и сразу войти в лобби.
    pub fn new(
        config: GameConfig,
        collaborators: Collaborators,
        players: Vec<P>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let mut game = Self {
            context: GameContext {
                config,
                collaborators,
                players,
                difficulty: Difficulty::default(),
                round: None,
            },
            state: GameState::default(),
        };
        game.switch(GameState::default())?;
        Ok(game)
    }

    /// Нажатие кнопки игрока ("join" в лобби, "Set!" во время поиска).
    pub fn on_player_action(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.check_player(player)?;
        let ctx = &mut self.context;

        let next = match &mut self.state {
            GameState::WaitForPlayers(wait) => {
                if let Some(idx) = wait.joined.iter().position(|&p| p == player) {
                    wait.joined.remove(idx);
                    ctx.collaborators.play(Sound::Cancel);
                    ctx.players[player].set_state(PlayerState::WaitingToJoin);
                } else {
                    wait.joined.push(player);
                    ctx.collaborators.play(Sound::Join);
                    ctx.players[player].set_state(PlayerState::RequestingToJoin);
                }
                None
            }
            GameState::Search(search) => {
                if !search.participants.contains(&player) {
                    return Ok(());
                }
                let Some(round) = ctx.round.as_mut() else {
                    return Ok(());
                };
                let points = search.points(ctx.config.scoring.max_points);
                let ticket = round.wait_for_turn_complete()?;
                let secs = ctx.config.timing.selection_secs(search.participants.len());
                Some(GameState::Selection(Selection {
                    participants: search.participants.clone(),
                    player,
                    points,
                    countdown: Countdown::new(secs),
                    ticket,
                }))
            }
            GameState::Start(_) | GameState::Selection(_) | GameState::GameOver(_) => None,
        };

        if let Some(next) = next {
            self.switch(next)?;
        }
        Ok(())
    }

    /// Главная кнопка: "start" в лобби, "restart" после конца игры.
    pub fn on_main_action(&mut self) -> Result<(), GameError> {
        let ctx = &mut self.context;

        let next = match &mut self.state {
            GameState::WaitForPlayers(wait) => {
                ctx.collaborators.play(Sound::Click);
                if wait.joined.is_empty() {
                    None
                } else {
                    let mut participants = wait.joined.clone();
                    participants.sort_unstable();
                    Some(GameState::Start(StartPhase { participants }))
                }
            }
            GameState::GameOver(_) => {
                if let Some(mut round) = ctx.round.take() {
                    if let Err(err) = round.terminate(&mut ctx.collaborators) {
                        ctx.round = Some(round);
                        return Err(err.into());
                    }
                }
                for player in ctx.players.iter_mut() {
                    player.reset();
                }
                Some(GameState::default())
            }
            GameState::Start(_) | GameState::Search(_) | GameState::Selection(_) => None,
        };

        if let Some(next) = next {
            self.switch(next)?;
        }
        Ok(())
    }

    /// Выбор сложности (только в лобби, в остальных состояниях игнорируется).
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        if !matches!(self.state, GameState::WaitForPlayers(_)) {
            return;
        }
        let ctx = &mut self.context;
        ctx.collaborators.play(Sound::Click);
        ctx.difficulty = difficulty;
        let cards = ctx.deck_size();
        for player in ctx.players.iter_mut() {
            player.set_cards_left(cards);
        }
    }

    /// Клик по карте на столе.
    pub fn click_card(&mut self, card: &Card) -> Result<ClickOutcome, GameError> {
        let ctx = &mut self.context;
        let Some(round) = ctx.round.as_mut() else {
            return Ok(ClickOutcome::Ignored);
        };
        let outcome = round.click_card(card, &mut ctx.collaborators)?;
        self.poll_turn()?;
        Ok(outcome)
    }

    /// Клик мимо карт - снять выбор.
    pub fn click_background(&mut self) {
        let ctx = &mut self.context;
        if let Some(round) = ctx.round.as_mut() {
            round.click_background(&mut ctx.collaborators);
        }
    }

    /// Подсветить следующий сет на столе.
    pub fn show_hint(&mut self) -> Option<Vec<Card>> {
        if !matches!(self.state, GameState::Search(_) | GameState::Selection(_)) {
            return None;
        }
        let ctx = &mut self.context;
        let round = ctx.round.as_mut()?;
        round.cycle_hint(&mut ctx.collaborators)
    }

    /// Собрать первый сет на столе за выбирающего игрока.
    pub fn auto_solve(&mut self) -> Result<Option<ClickOutcome>, GameError> {
        if !matches!(self.state, GameState::Selection(_)) {
            return Ok(None);
        }
        let ctx = &mut self.context;
        let Some(round) = ctx.round.as_mut() else {
            return Ok(None);
        };
        let outcome = round.auto_solve(&mut ctx.collaborators)?;
        self.poll_turn()?;
        Ok(outcome)
    }

    /// Протекание времени: двигает убывание очков (поиск) или отсчёт (выбор).
    pub fn advance(&mut self, delta_ms: u64) -> Result<(), GameError> {
        let ctx = &mut self.context;
        let mut expired = false;

        match &mut self.state {
            GameState::Search(search) => {
                let Some(decay) = search.decay.as_mut() else {
                    return Ok(());
                };
                for event in decay.advance(delta_ms) {
                    match event {
                        DecayEvent::Decayed(points) => {
                            for player in ctx.players.iter_mut() {
                                player.set_available_points(points);
                            }
                            ctx.collaborators.play(Sound::PointDecay);
                        }
                        DecayEvent::FloorReached => {
                            if let Some(round) = ctx.round.as_mut() {
                                round.show_hint(&mut ctx.collaborators);
                            }
                        }
                    }
                }
            }
            GameState::Selection(selection) => {
                for event in selection.countdown.advance(delta_ms) {
                    let player = &mut ctx.players[selection.player];
                    match event {
                        CountdownEvent::Progress(progress) => player.set_count_down(progress),
                        CountdownEvent::Second(_) => {
                            ctx.collaborators.play(Sound::Countdown);
                            player.flash_count_down();
                        }
                        CountdownEvent::Expired => expired = true,
                    }
                }
                if expired {
                    if let Some(round) = ctx.round.as_mut() {
                        round.cancel_turn(&mut ctx.collaborators);
                    }
                    ctx.players[selection.player].add_score(-selection.points);
                }
            }
            GameState::WaitForPlayers(_) | GameState::Start(_) | GameState::GameOver(_) => {}
        }

        if expired {
            self.poll_turn()?;
        }
        Ok(())
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn context(&self) -> &GameContext<P> {
        &self.context
    }

    pub fn collaborators_mut(&mut self) -> &mut Collaborators {
        &mut self.context.collaborators
    }

    pub fn players(&self) -> &[P] {
        &self.context.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&P> {
        self.context.players.get(id)
    }

    pub fn round(&self) -> Option<&Round> {
        self.context.round.as_ref()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.context.difficulty
    }

    pub fn config(&self) -> &GameConfig {
        &self.context.config
    }

    pub fn participants(&self) -> &[PlayerId] {
        self.state.participants()
    }

    /// Сколько сейчас стоит сет (во время поиска и выбора).
    pub fn available_points(&self) -> Option<i64> {
        match &self.state {
            GameState::Search(search) => Some(search.points(self.context.config.scoring.max_points)),
            GameState::Selection(selection) => Some(selection.points),
            _ => None,
        }
    }

    /// Кто сейчас выбирает карты.
    pub fn selecting_player(&self) -> Option<PlayerId> {
        match &self.state {
            GameState::Selection(selection) => Some(selection.player),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match &self.state {
            GameState::GameOver(over) => over.winner,
            _ => None,
        }
    }

    fn check_player(&self, player: PlayerId) -> Result<(), GameError> {
        if player < self.context.players.len() {
            Ok(())
        } else {
            Err(GameError::UnknownPlayer(player))
        }
    }

    /// Забрать результаты хода, если раунд их уже выдал.
    fn poll_turn(&mut self) -> Result<(), GameError> {
        let ctx = &mut self.context;
        let GameState::Selection(selection) = &mut self.state else {
            return Ok(());
        };

        if let Some(is_set) = selection.ticket.try_selection() {
            selection.countdown.cancel();
            let player = &mut ctx.players[selection.player];
            player.set_count_down(0.0);
            if is_set {
                player.add_score(selection.points);
            } else {
                player.add_score(-selection.points);
            }
        }

        let Some(game_over) = selection.ticket.try_completion() else {
            return Ok(());
        };
        for &id in &selection.participants {
            ctx.players[id].set_state(PlayerState::Playing);
        }
        let participants = selection.participants.clone();
        let next = if game_over {
            GameState::GameOver(GameOverPhase {
                participants,
                winner: None,
            })
        } else {
            GameState::Search(Search {
                participants,
                decay: None,
            })
        };
        self.switch(next)
    }

    /// Переход: завершить текущее состояние, войти в новое.
    /// Вход может сразу потребовать следующий переход (старт → поиск).
    fn switch(&mut self, next: GameState) -> Result<(), GameError> {
        let mut next = next;
        loop {
            self.state.terminate();
            debug!("switch to {}", next.phase());
            self.state = next;
            match self.enter()? {
                Some(follow) => next = follow,
                None => return Ok(()),
            }
        }
    }

    fn enter(&mut self) -> Result<Option<GameState>, GameError> {
        let ctx = &mut self.context;

        match &mut self.state {
            GameState::WaitForPlayers(_) => {
                let cards = ctx.deck_size();
                for player in ctx.players.iter_mut() {
                    player.set_state(PlayerState::WaitingToJoin);
                    player.set_action_name("join");
                    player.set_cards_left(cards);
                }
                Ok(None)
            }
            GameState::Start(start) => {
                let participants = start.participants.clone();
                for (id, player) in ctx.players.iter_mut().enumerate() {
                    if !participants.contains(&id) {
                        player.set_state(PlayerState::Hiding);
                    }
                }

                let rules = ctx.difficulty.rules(ctx.config.num_features);
                let mut round = Round::new(rules, ctx.config.timing.pacing, &mut ctx.collaborators);
                for player in ctx.players.iter_mut() {
                    player.set_cards_left(round.available());
                }
                round.start(&mut ctx.collaborators)?;
                ctx.round = Some(round);

                for &id in &participants {
                    let player = &mut ctx.players[id];
                    player.set_action_name("Set!");
                    player.set_state(PlayerState::Playing);
                }
                Ok(Some(GameState::Search(Search {
                    participants,
                    decay: None,
                })))
            }
            GameState::Search(search) => {
                let cards = ctx.cards_left();
                let scoring = ctx.config.scoring;
                search.decay = scoring.decay_enabled.then(|| ScoreDecay::new(scoring));
                for player in ctx.players.iter_mut() {
                    player.set_cards_left(cards);
                    player.set_available_points(scoring.max_points);
                }
                // Раунд мог закончиться прямо на раздаче (ни одного сета в колоде).
                if ctx.round.as_ref().is_some_and(Round::is_game_over) {
                    return Ok(Some(GameState::GameOver(GameOverPhase {
                        participants: search.participants.clone(),
                        winner: None,
                    })));
                }
                Ok(None)
            }
            GameState::Selection(selection) => {
                ctx.collaborators.play(Sound::Select);
                for &id in &selection.participants {
                    if id != selection.player {
                        ctx.players[id].set_state(PlayerState::Hiding);
                    }
                }
                let player = &mut ctx.players[selection.player];
                player.set_state(PlayerState::Selecting);
                player.set_count_down(1.0);
                Ok(None)
            }
            GameState::GameOver(over) => {
                over.winner = best_player(&ctx.players, &over.participants);
                if let Some(winner) = over.winner {
                    ctx.players[winner].set_state(PlayerState::Winner);
                }
                ctx.collaborators.play(Sound::GameOver);
                Ok(None)
            }
        }
    }
}

/// Участник с наибольшим счётом; при равенстве - первый по порядку мест.
fn best_player<P: PlayerCapability>(players: &[P], participants: &[PlayerId]) -> Option<PlayerId> {
    let mut best: Option<PlayerId> = None;
    for &id in participants {
        match best {
            Some(current) if players[current].score() >= players[id].score() => {}
            _ => best = Some(id),
        }
    }
    best
}
