pub mod order;
pub mod play;
pub mod score;

use clap::ValueEnum;
use comfy_table::{ContentArrangement, Table};

use zilch_engine::{GroupScoring, OrderMode};
use zilch_game::{FinalRound, Standing};

/// `--final-round` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FinalRoundArg {
    /// Everyone gets one more turn after the target is reached
    Everyone,
    /// Only players below the target get one fresh turn
    Trailing,
}

impl From<FinalRoundArg> for FinalRound {
    fn from(arg: FinalRoundArg) -> Self {
        match arg {
            FinalRoundArg::Everyone => FinalRound::EveryoneOnce,
            FinalRoundArg::Trailing => FinalRound::TrailingPlayers,
        }
    }
}

/// `--order` / `--mode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Roll off every tie
    All,
    /// Roll off for first place only
    First,
}

impl From<OrderArg> for OrderMode {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::All => OrderMode::AllTies,
            OrderArg::First => OrderMode::FirstPlaceOnly,
        }
    }
}

/// `--group-scoring` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupArg {
    /// 100 x face x count
    Multiplicative,
    /// 1000 per die beyond three
    Flat,
}

impl From<GroupArg> for GroupScoring {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::Multiplicative => GroupScoring::Multiplicative,
            GroupArg::Flat => GroupScoring::Flat,
        }
    }
}

/// Render totals as a table, highest first.
fn standings_table(standings: &[Standing]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Player", "Score"]);
    for (i, standing) in standings.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            standing.player.clone(),
            standing.score.to_string(),
        ]);
    }
    table
}
