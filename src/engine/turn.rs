//! Протокол хода: одноразовая встреча между "игрок заявил сет"
//! и "выбранные K карт оценены".

use tokio::sync::oneshot;

use crate::engine::errors::RoundError;

/// Открытый ход. Живёт внутри `TurnSlot` раунда.
#[derive(Debug)]
pub struct Turn {
    on_selection_complete: Option<oneshot::Sender<bool>>,
    on_turn_complete: oneshot::Sender<bool>,
}

impl Turn {
    fn open() -> (Self, TurnTicket) {
        let (selection_tx, selection_rx) = oneshot::channel();
        let (complete_tx, complete_rx) = oneshot::channel();
        let turn = Turn {
            on_selection_complete: Some(selection_tx),
            on_turn_complete: complete_tx,
        };
        let ticket = TurnTicket {
            selection: selection_rx,
            completion: complete_rx,
        };
        (turn, ticket)
    }

    /// Сообщить результат оценки выбранных карт (не более одного раза).
    pub fn selection_complete(&mut self, is_set: bool) {
        if let Some(tx) = self.on_selection_complete.take() {
            // Получатель мог уже уйти - это не ошибка раунда.
            let _ = tx.send(is_set);
        }
    }

    /// Завершить ход: `game_over` - закончилась ли игра.
    pub fn complete(self, game_over: bool) {
        let _ = self.on_turn_complete.send(game_over);
    }
}

/// Сторона ожидающего: два одноразовых результата.
#[derive(Debug)]
pub struct TurnTicket {
    selection: oneshot::Receiver<bool>,
    completion: oneshot::Receiver<bool>,
}

impl TurnTicket {
    /// Результат оценки выбора (`true` - это сет). Отдаётся ровно один раз.
    pub fn try_selection(&mut self) -> Option<bool> {
        self.selection.try_recv().ok()
    }

    /// Итог хода (`true` - игра окончена). Отдаётся ровно один раз.
    pub fn try_completion(&mut self) -> Option<bool> {
        self.completion.try_recv().ok()
    }

    /// Асинхронно дождаться завершения хода.
    /// `None`, если раунд выбросил ход, так и не завершив его.
    pub async fn completed(self) -> Option<bool> {
        self.completion.await.ok()
    }
}

/// Регистр на один ход. Одновременно может быть открыт только один ход.
#[derive(Debug, Default)]
pub struct TurnSlot {
    slot: Option<Turn>,
}

impl TurnSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Открыть новый ход. Если ход уже открыт - отказ, старый ход не трогаем.
    pub fn open(&mut self) -> Result<TurnTicket, RoundError> {
        if self.slot.is_some() {
            return Err(RoundError::TurnOutstanding);
        }
        let (turn, ticket) = Turn::open();
        self.slot = Some(turn);
        Ok(ticket)
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn selection_complete(&mut self, is_set: bool) {
        if let Some(turn) = self.slot.as_mut() {
            turn.selection_complete(is_set);
        }
    }

    /// Забрать ход из регистра (регистр становится пустым).
    pub fn take(&mut self) -> Option<Turn> {
        self.slot.take()
    }
}
