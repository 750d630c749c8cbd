//! Line-based prompts on any reader/writer pair.
//!
//! [`Prompter`] is the interactive player: it shows rolls and options,
//! re-asks on bad input, and fails with `input closed` when the reader is
//! exhausted.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

use colored::Colorize;

use zilch_engine::{
    DiceSet, OrderMode, ScoringCombination, TurnChoice, TurnDecider, TurnState, ZilchError,
    ZilchResult,
};
use zilch_game::{Carry, PlayerDecider};

pub struct Prompter<R, W> {
    input: R,
    output: W,
    line: String,
    scores: Vec<(String, u32)>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
            scores: Vec::new(),
        }
    }

    /// Totals shown alongside bank/zilch projections.
    pub fn set_scores<'a>(&mut self, scores: impl Iterator<Item = (&'a str, u32)>) {
        self.scores = scores.map(|(name, score)| (name.to_string(), score)).collect();
    }

    pub fn say(&mut self, text: impl Display) -> ZilchResult<()> {
        writeln!(self.output, "{text}").map_err(io_error)
    }

    fn read(&mut self, question: &str) -> ZilchResult<&str> {
        write!(self.output, "{question}").map_err(io_error)?;
        self.output.flush().map_err(io_error)?;

        self.line.clear();
        match self.input.read_line(&mut self.line) {
            Ok(0) => Err(ZilchError::Aborted("input closed".into())),
            Ok(_) => Ok(self.line.trim()),
            Err(e) => Err(io_error(e)),
        }
    }

    /// Ask until the answer is a number in `range`.
    pub fn ask_number(&mut self, question: &str, range: RangeInclusive<usize>) -> ZilchResult<usize> {
        loop {
            let answer = self.read(question)?.to_string();
            match answer.parse::<usize>() {
                Ok(n) if range.contains(&n) => return Ok(n),
                _ => self.say(
                    format!(
                        "'{answer}' is not a valid choice; enter {} to {}.",
                        range.start(),
                        range.end()
                    )
                    .yellow(),
                )?,
            }
        }
    }

    /// Ask for `count` non-empty, distinct player names.
    pub fn ask_names(&mut self, count: usize) -> ZilchResult<Vec<String>> {
        let mut names: Vec<String> = Vec::with_capacity(count);
        while names.len() < count {
            let question = format!("Name of player {}: ", names.len() + 1);
            let name = self.read(&question)?.to_string();
            if name.is_empty() {
                self.say("Names must not be empty.".yellow())?;
            } else if names.contains(&name) {
                self.say(format!("'{name}' is already taken.").yellow())?;
            } else {
                names.push(name);
            }
        }
        Ok(names)
    }

    pub fn ask_order_mode(&mut self) -> ZilchResult<OrderMode> {
        self.say("How should the playing order be decided?")?;
        self.say("  1: Roll off every tie (fully random order)")?;
        self.say("  2: Roll for first place; the rest follow seating order")?;
        Ok(match self.ask_number("Choice: ", 1..=2)? {
            1 => OrderMode::AllTies,
            _ => OrderMode::FirstPlaceOnly,
        })
    }

    fn total_of(&self, player: &str) -> u32 {
        self.scores
            .iter()
            .find(|(name, _)| name == player)
            .map_or(0, |&(_, score)| score)
    }
}

impl<R: BufRead, W: Write> TurnDecider for Prompter<R, W> {
    fn select_option(
        &mut self,
        player: &str,
        state: &TurnState,
        roll: &DiceSet,
        options: &[ScoringCombination],
    ) -> ZilchResult<usize> {
        if state.locked_points > 0 && state.turn_score == 0 {
            self.say(format!("Hot dice! {} points locked.", state.locked_points).green())?;
        }
        self.say(format!(
            "{player} rolled {roll}  (at risk {}, locked {})",
            state.turn_score, state.locked_points
        ))?;
        for (i, option) in options.iter().enumerate() {
            self.say(format!("  {}: {option}", i + 1))?;
        }
        let choice = self.ask_number("Select a scoring option: ", 1..=options.len())?;
        Ok(choice - 1)
    }

    fn continue_or_bank(&mut self, player: &str, state: &TurnState) -> ZilchResult<TurnChoice> {
        let total = self.total_of(player);
        self.say(format!(
            "Bank now: {} total. Roll and zilch: {} total.",
            total.saturating_add(state.bank_value()),
            total.saturating_add(state.locked_points)
        ))?;
        self.say(format!(
            "  1: Roll {} free dice (risking {} points)",
            state.free_dice, state.turn_score
        ))?;
        self.say("  2: Bank")?;
        Ok(match self.ask_number("Choice: ", 1..=2)? {
            1 => TurnChoice::Roll,
            _ => TurnChoice::Bank,
        })
    }
}

impl<R: BufRead, W: Write> PlayerDecider for Prompter<R, W> {
    fn build_on(&mut self, player: &str, carry: &Carry) -> ZilchResult<bool> {
        self.say(format!(
            "{player}, the last player banked {} points with {} free dice.",
            carry.score, carry.free_dice
        ))?;
        self.say("  1: Roll all 10 dice")?;
        self.say(format!(
            "  2: Build on {} points with {} free dice",
            carry.score, carry.free_dice
        ))?;
        Ok(self.ask_number("Choice: ", 1..=2)? == 2)
    }
}

fn io_error(e: std::io::Error) -> ZilchError {
    ZilchError::Aborted(e.to_string())
}
