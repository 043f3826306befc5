//! Соавторы движка без UI: для тестов, симуляций и ботов.
//!
//! Всё, что они "сделали", можно посмотреть через `HeadlessProbe`.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::domain::card::Card;
use crate::domain::table::CardHandle;
use crate::engine::{CardMarker, CardRenderer, Collaborators, FramePacer, RandomSource, Sound, SoundSink};
use crate::infra::rng::DeterministicRng;

/// Что видел "экран".
#[derive(Debug, Default)]
pub struct RenderLog {
    next_handle: u64,
    pub cards: HashMap<CardHandle, Card>,
    pub placeholders: HashSet<CardHandle>,
    pub markers: HashMap<CardHandle, HashSet<CardMarker>>,
    pub discarded: u64,
}

/// Рендерер, который только выдаёт дескрипторы и запоминает пометки.
#[derive(Clone, Debug, Default)]
pub struct HeadlessRenderer {
    log: Rc<RefCell<RenderLog>>,
}

impl HeadlessRenderer {
    fn next_handle(log: &mut RenderLog) -> CardHandle {
        log.next_handle += 1;
        CardHandle(log.next_handle)
    }
}

impl CardRenderer for HeadlessRenderer {
    fn render(&mut self, card: &Card) -> CardHandle {
        let mut log = self.log.borrow_mut();
        let handle = Self::next_handle(&mut log);
        log.cards.insert(handle, card.clone());
        handle
    }

    fn render_placeholder(&mut self) -> CardHandle {
        let mut log = self.log.borrow_mut();
        let handle = Self::next_handle(&mut log);
        log.placeholders.insert(handle);
        handle
    }

    fn set_marker(&mut self, handle: CardHandle, marker: CardMarker, on: bool) {
        let mut log = self.log.borrow_mut();
        let markers = log.markers.entry(handle).or_default();
        if on {
            markers.insert(marker);
        } else {
            markers.remove(&marker);
        }
    }

    fn discard(&mut self, handle: CardHandle) {
        let mut log = self.log.borrow_mut();
        log.cards.remove(&handle);
        log.placeholders.remove(&handle);
        log.markers.remove(&handle);
        log.discarded += 1;
    }
}

/// Звук, который просто записывает события.
#[derive(Clone, Debug, Default)]
pub struct RecordingSoundSink {
    played: Rc<RefCell<Vec<Sound>>>,
}

impl SoundSink for RecordingSoundSink {
    fn play(&mut self, sound: Sound) {
        self.played.borrow_mut().push(sound);
    }
}

/// Ожидание кадров без ожидания: считаем, сколько кадров "прошло".
#[derive(Clone, Debug, Default)]
pub struct CountingPacer {
    frames: Rc<RefCell<u64>>,
}

impl FramePacer for CountingPacer {
    fn wait_frame(&mut self) {
        *self.frames.borrow_mut() += 1;
    }

    fn wait_frames(&mut self, frames: u32) {
        *self.frames.borrow_mut() += u64::from(frames);
    }

    fn wait_for_animation(&mut self, _handle: CardHandle) {
        *self.frames.borrow_mut() += 1;
    }
}

/// Доступ к тому, что записали headless-соавторы.
#[derive(Clone, Debug, Default)]
pub struct HeadlessProbe {
    render: Rc<RefCell<RenderLog>>,
    played: Rc<RefCell<Vec<Sound>>>,
    frames: Rc<RefCell<u64>>,
}

impl HeadlessProbe {
    pub fn sounds(&self) -> Vec<Sound> {
        self.played.borrow().clone()
    }

    pub fn count(&self, sound: Sound) -> usize {
        self.played.borrow().iter().filter(|&&s| s == sound).count()
    }

    pub fn clear_sounds(&self) {
        self.played.borrow_mut().clear();
    }

    pub fn frames(&self) -> u64 {
        *self.frames.borrow()
    }

    /// Есть ли пометка на карте с таким дескриптором.
    pub fn has_marker(&self, handle: CardHandle, marker: CardMarker) -> bool {
        self.render
            .borrow()
            .markers
            .get(&handle)
            .is_some_and(|m| m.contains(&marker))
    }

    /// Сколько карт сейчас отрисовано (без заглушек).
    pub fn rendered_cards(&self) -> usize {
        self.render.borrow().cards.len()
    }

    pub fn placeholders(&self) -> usize {
        self.render.borrow().placeholders.len()
    }
}

/// Headless-набор соавторов с детерминированным RNG.
pub fn headless(seed: u64) -> (Collaborators, HeadlessProbe) {
    headless_with_rng(Box::new(DeterministicRng::from_seed(seed)))
}

pub fn headless_with_rng(rng: Box<dyn RandomSource>) -> (Collaborators, HeadlessProbe) {
    let probe = HeadlessProbe::default();
    let renderer = HeadlessRenderer {
        log: Rc::clone(&probe.render),
    };
    let sound = RecordingSoundSink {
        played: Rc::clone(&probe.played),
    };
    let pacer = CountingPacer {
        frames: Rc::clone(&probe.frames),
    };
    let collaborators = Collaborators::new(Box::new(renderer), Box::new(sound), Box::new(pacer), rng);
    (collaborators, probe)
}
