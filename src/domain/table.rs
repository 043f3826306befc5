use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Непрозрачный дескриптор отрисованной карты (выдаётся рендерером).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CardHandle(pub u64);

/// Карта, лежащая на столе лицом вверх.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableEntry {
    pub card: Card,
    pub handle: CardHandle,
}

/// Перемещение карты между рядами при выравнивании раскладки.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowMove {
    pub card: Card,
    pub from: usize,
    pub to: usize,
}

/// Открытые карты на столе.
///
/// - `entries` хранят порядок выкладки (от него зависит порядок найденных сетов);
/// - `rows` - раскладка по рядам, новая карта всегда уходит в самый короткий ряд.
///
/// Инвариант: одна и та же карта не лежит на столе дважды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    entries: Vec<TableEntry>,
    rows: Vec<Vec<Card>>,
}

impl Table {
    /// Пустой стол с `num_rows` рядами (по числу вариаций).
    pub fn new(num_rows: usize) -> Self {
        Self {
            entries: Vec::new(),
            rows: vec![Vec::new(); num_rows.max(1)],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.entries.iter().any(|e| &e.card == card)
    }

    pub fn handle_of(&self, card: &Card) -> Option<CardHandle> {
        self.entries.iter().find(|e| &e.card == card).map(|e| e.handle)
    }

    /// Карты в порядке выкладки.
    pub fn cards(&self) -> Vec<Card> {
        self.entries.iter().map(|e| e.card.clone()).collect()
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn rows(&self) -> &[Vec<Card>] {
        &self.rows
    }

    /// Номер ряда, в котором лежит карта.
    pub fn row_of(&self, card: &Card) -> Option<usize> {
        self.rows.iter().position(|row| row.contains(card))
    }

    /// Положить карту на стол. Возвращает номер ряда.
    pub fn place(&mut self, card: Card, handle: CardHandle) -> usize {
        debug_assert!(!self.contains(&card), "{card} уже лежит на столе");

        let row = self.shortest_row();
        self.rows[row].push(card.clone());
        self.entries.push(TableEntry { card, handle });
        row
    }

    /// Убрать карту со стола. Возвращает её дескриптор, если карта была на столе.
    pub fn remove(&mut self, card: &Card) -> Option<CardHandle> {
        let pos = self.entries.iter().position(|e| &e.card == card)?;
        let entry = self.entries.remove(pos);
        for row in self.rows.iter_mut() {
            row.retain(|c| c != card);
        }
        Some(entry.handle)
    }

    /// Убрать всё со стола (раскладка рядов сохраняется пустой).
    pub fn clear(&mut self) -> Vec<CardHandle> {
        for row in self.rows.iter_mut() {
            row.clear();
        }
        self.entries.drain(..).map(|e| e.handle).collect()
    }

    /// Выравнивание рядов: пока самый длинный ряд длиннее самого короткого
    /// хотя бы на 2, переносим его последнюю карту в самый короткий.
    pub fn rebalance(&mut self) -> Vec<RowMove> {
        let mut moves = Vec::new();
        loop {
            let shortest = self.shortest_row();
            let longest = self.longest_row();
            if self.rows[shortest].len() + 2 > self.rows[longest].len() {
                break;
            }
            let Some(card) = self.rows[longest].pop() else {
                break;
            };
            self.rows[shortest].push(card.clone());
            moves.push(RowMove {
                card,
                from: longest,
                to: shortest,
            });
        }
        moves
    }

    /// Первый из самых коротких рядов.
    fn shortest_row(&self) -> usize {
        let mut best = 0;
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() < self.rows[best].len() {
                best = i;
            }
        }
        best
    }

    /// Последний из самых длинных рядов.
    fn longest_row(&self) -> usize {
        let mut best = 0;
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() >= self.rows[best].len() {
                best = i;
            }
        }
        best
    }
}
