use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;
use tracing::{debug, info};

use zilch_engine::{DiceRoller, DiceSet, ZilchResult};
use zilch_game::{Game, GameConfig, TurnReport};

use super::{FinalRoundArg, GroupArg, OrderArg, standings_table};
use crate::commands::order::describe_roll_off;
use crate::prompt::Prompter;

pub struct PlayOptions {
    pub seed: Option<u64>,
    pub target: Option<u32>,
    pub final_round: Option<FinalRoundArg>,
    pub no_carry: bool,
    pub order: Option<OrderArg>,
    pub group_scoring: Option<GroupArg>,
    pub config: Option<PathBuf>,
    pub log: bool,
}

impl PlayOptions {
    /// The config file (or defaults) with command-line overrides applied.
    fn config(&self) -> Result<GameConfig, String> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path).map_err(|e| format!("{}: {e}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(target) = self.target {
            config = config.with_target_score(target);
        }
        if let Some(final_round) = self.final_round {
            config = config.with_final_round(final_round.into());
        }
        if self.no_carry {
            config = config.with_carry_over(false);
        }
        if let Some(order) = self.order {
            config = config.with_order_mode(order.into());
        }
        if let Some(groups) = self.group_scoring {
            config = config.with_group_scoring(groups.into());
        }
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

pub fn run(options: PlayOptions) -> Result<(), String> {
    let config = options.config()?;
    debug!(
        seed = ?config.seed,
        target = config.target_score,
        final_round = ?config.final_round,
        carry_over = config.carry_over,
        "starting game"
    );
    let stdin = io::stdin();
    let stdout = io::stdout();
    let roller = config.roller();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
    play(
        &mut prompter,
        config,
        roller,
        options.order.is_none(),
        options.log,
    )
}

/// Remembers the last roll so a Zilch can be shown.
struct Shown<R> {
    inner: R,
    last: Option<DiceSet>,
}

impl<R: DiceRoller> DiceRoller for Shown<R> {
    fn roll(&mut self, count: usize) -> ZilchResult<DiceSet> {
        let roll = self.inner.roll(count)?;
        self.last = Some(roll);
        Ok(roll)
    }
}

fn play<R: BufRead, W: Write, D: DiceRoller>(
    prompter: &mut Prompter<R, W>,
    mut config: GameConfig,
    dice: D,
    ask_order: bool,
    show_log: bool,
) -> Result<(), String> {
    let err = |e: zilch_engine::ZilchError| e.to_string();

    prompter.say("Welcome to Zilch!".bold()).map_err(err)?;
    prompter
        .say(format!("First to {} points starts the final round.", config.target_score))
        .map_err(err)?;

    let count = prompter
        .ask_number("Number of players: ", 1..=usize::from(u8::MAX))
        .map_err(err)?;
    let names = prompter.ask_names(count).map_err(err)?;
    if ask_order && names.len() >= 3 {
        config.order_mode = prompter.ask_order_mode().map_err(err)?;
    }

    let mut roller = Shown {
        inner: dice,
        last: None,
    };
    let (mut game, order) =
        Game::with_rolled_order(names, config, &mut roller).map_err(|e| e.to_string())?;

    for roll_off in order.roll_offs() {
        prompter.say(describe_roll_off(roll_off)).map_err(err)?;
    }
    let seats: Vec<&str> = game.scores().map(|(name, _)| name).collect();
    prompter
        .say(format!("Playing order: {}", seats.join(" -> ")))
        .map_err(err)?;
    prompter
        .say(format!(
            "Four or more of a kind: {} scoring.",
            game.engine().table().groups
        ))
        .map_err(err)?;

    while let Some(player) = game.current_player() {
        let player = player.to_string();
        let score = game.score_of(&player).unwrap_or(0);
        prompter.say("").map_err(err)?;
        prompter
            .say(format!("{}'s turn (score {score})", player.bold()))
            .map_err(err)?;
        prompter.set_scores(game.scores());

        let report = game
            .play_turn(&mut roller, prompter)
            .map_err(|e| e.to_string())?;
        announce(prompter, &report, roller.last, game.config().target_score).map_err(err)?;
    }

    prompter.say("").map_err(err)?;
    prompter.say(standings_table(&game.standings())).map_err(err)?;
    if let Some(winner) = game.winner() {
        info!(
            winner = %winner.player,
            score = winner.score,
            turns = game.turns_played(),
            "game finished"
        );
        prompter
            .say(format!(
                "Congratulations, {}! You win with {} points.",
                winner.player.bold(),
                winner.score
            ))
            .map_err(err)?;
    }

    if show_log {
        prompter.say("").map_err(err)?;
        prompter.say("Event log".bold().underline()).map_err(err)?;
        for event in game.log().events() {
            let turn = format!("[turn {:>3}]", event.turn).dimmed();
            prompter.say(format!("  {turn} {}", event.kind)).map_err(err)?;
        }
    }
    Ok(())
}

fn announce<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    report: &TurnReport,
    last_roll: Option<DiceSet>,
    target: u32,
) -> ZilchResult<()> {
    let player = &report.player;
    if report.outcome.zilched {
        let roll = last_roll.map(|r| r.to_string()).unwrap_or_default();
        prompter.say(format!("{player} rolled {roll}"))?;
        prompter.say(format!("Zilch! {player} keeps {} points.", report.outcome.score).red())?;
    } else {
        prompter.say(format!(
            "{player} banks {} points ({} free dice left).",
            report.outcome.score, report.outcome.free_dice
        ))?;
    }
    prompter.say(format!("{player} now has {} points.", report.total))?;
    if report.final_round_triggered {
        prompter.say(format!("{player} passed {target} points: final round!").yellow().bold())?;
    }
    Ok(())
}
