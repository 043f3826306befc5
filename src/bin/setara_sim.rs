// Headless-симуляция партии: боты заходят в лобби, заявляют сеты
// и собирают их (или не успевают), пока колода не кончится.
//
// Запуск: setara_sim [seed|random] [normal|expert] [players]

use std::error::Error;

use log::info;
use setara_engine::api::{execute, game_view, Command, CommandResult};
use setara_engine::domain::{Difficulty, Player};
use setara_engine::engine::ClickOutcome;
use setara_engine::infra::{headless, headless_with_rng, GameConfig, SystemRng};
use setara_engine::lobby::{Game, GamePhase};

/// Верхняя граница числа заявок за партию.
const MAX_CLAIMS: usize = 1_000;

/// Каждый N-й заявивший сет бот "зевает" и не успевает выбрать карты.
const SLOW_BOT_EVERY: usize = 7;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: Option<u64> = match args.next().as_deref() {
        Some("random") => None,
        Some(raw) => Some(raw.parse()?),
        None => Some(42),
    };
    let difficulty = match args.next().as_deref() {
        Some("expert") => Difficulty::Expert,
        _ => Difficulty::Normal,
    };
    let num_players: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(3).max(1);

    println!("setara_sim: seed={seed:?}, difficulty={difficulty:?}, players={num_players}");

    // 1. Игра без UI и без пауз на анимацию
    let (collaborators, probe) = match seed {
        Some(seed) => headless(seed),
        None => headless_with_rng(Box::new(SystemRng)),
    };
    let players: Vec<Player> = (0..num_players)
        .map(|id| Player::new(id, format!("bot-{id}")))
        .collect();
    let mut game = Game::new(GameConfig::instant(), collaborators, players)?;

    // 2. Лобби: выбираем сложность, все жмут "join", старт
    execute(&mut game, Command::SelectDifficulty { difficulty })?;
    for player in 0..num_players {
        execute(&mut game, Command::PlayerAction { player })?;
    }
    execute(&mut game, Command::MainAction)?;

    // 3. Поиск / выбор, пока не конец игры
    let mut claims = 0;
    while game.phase() == GamePhase::Search && claims < MAX_CLAIMS {
        let player = claims % num_players;
        claims += 1;

        // Немного "подумали" - стоимость сета успела убыть.
        execute(&mut game, Command::AdvanceTime { millis: 2_500 * (claims as u64 % 5) })?;
        execute(&mut game, Command::PlayerAction { player })?;
        if game.phase() != GamePhase::Selection {
            continue;
        }

        if claims % SLOW_BOT_EVERY == 0 {
            let secs = game.config().timing.selection_secs(game.participants().len());
            execute(&mut game, Command::AdvanceTime { millis: u64::from(secs) * 1_000 + 1 })?;
            info!("bot-{player} не успел выбрать карты");
            continue;
        }

        match execute(&mut game, Command::AutoSolve)? {
            CommandResult::Click(ClickOutcome::Evaluated { is_set, game_over }) => {
                info!("bot-{player}: set={is_set}, game_over={game_over}");
            }
            other => info!("bot-{player}: {other:?}"),
        }
    }

    // 4. Итог
    let view = game_view(&game);
    println!("{}", serde_json::to_string_pretty(&view)?);
    println!(
        "claims={claims}, winner={:?}, frames={}, sounds={}",
        game.winner(),
        probe.frames(),
        probe.sounds().len()
    );
    Ok(())
}
