use crate::encoding::{encode, Planes};
use crate::error::TraversalError;
use crate::layout::{expand, Layout};
use crate::rules::RulesEngine;
use crate::text::ResultLabel;
use log::{debug, trace};

/// Which consecutive layouts become training pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairPolicy {
    /// Pairs around White's plies (0, 2, 4, ...)
    WhiteMoved,
    /// Pairs around Black's plies (1, 3, 5, ...)
    BlackMoved,
    /// Every ply
    All,
}

impl PairPolicy {
    /// The moves worth learning from for a given outcome:
    /// the winner's moves, or both sides' in a draw
    pub fn for_result(result: &ResultLabel) -> Option<PairPolicy> {
        match result {
            ResultLabel::Win => Some(PairPolicy::WhiteMoved),
            ResultLabel::Lose => Some(PairPolicy::BlackMoved),
            ResultLabel::Draw => Some(PairPolicy::All),
            ResultLabel::Unknown(_) => None,
        }
    }

    fn first_ply(self) -> usize {
        match self {
            PairPolicy::WhiteMoved | PairPolicy::All => 0,
            PairPolicy::BlackMoved => 1,
        }
    }

    fn step(self) -> usize {
        match self {
            PairPolicy::WhiteMoved | PairPolicy::BlackMoved => 2,
            PairPolicy::All => 1,
        }
    }
}

/// Board before and after one ply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanePair {
    pub before: Planes,
    pub after: Planes,
}

fn capture<E: RulesEngine>(position: &E, ply: usize) -> Result<Layout, TraversalError> {
    expand(&position.board_layout()).map_err(|source| TraversalError::Layout { ply, source })
}

/// Plays the moves from `start`, capturing the layout before each one.
/// The position after the last move is not captured, so `moves.len()`
/// layouts come back.
pub fn replay<E, S>(start: E, moves: &[S]) -> Result<Vec<Layout>, TraversalError>
where
    E: RulesEngine,
    S: AsRef<str>,
{
    match replay_lenient(start, moves) {
        (layouts, None) => Ok(layouts),
        (_, Some(err)) => Err(err),
    }
}

/// Like [`replay`], but keeps the layouts captured before a failing move.
/// The layout in front of the rejected move is included.
pub fn replay_lenient<E, S>(mut position: E, moves: &[S]) -> (Vec<Layout>, Option<TraversalError>)
where
    E: RulesEngine,
    S: AsRef<str>,
{
    let mut layouts = Vec::with_capacity(moves.len());

    for (ply, token) in moves.iter().enumerate() {
        match capture(&position, ply) {
            Ok(layout) => layouts.push(layout),
            Err(err) => return (layouts, Some(err)),
        }

        if let Err(source) = position.apply_san(token.as_ref()) {
            debug!("replay stopped at ply {}: {}", ply, source);
            return (layouts, Some(TraversalError::Rules { ply, source }));
        }
    }

    (layouts, None)
}

/// Encodes `(layouts[i], layouts[i + 1])` for the plies the policy selects
pub fn extract_pairs(layouts: &[Layout], policy: PairPolicy) -> Vec<PlanePair> {
    let mut pairs = vec![];
    let mut i = policy.first_ply();

    loop {
        let (Some(before), Some(after)) = (layouts.get(i), layouts.get(i + 1)) else {
            trace!("pair extraction ended at ply {} of {}", i, layouts.len());
            break;
        };

        pairs.push(PlanePair {
            before: encode(before),
            after: encode(after),
        });
        i += policy.step();
    }

    pairs
}

pub fn game_pairs<E, S>(
    start: E,
    moves: &[S],
    policy: PairPolicy,
) -> Result<Vec<PlanePair>, TraversalError>
where
    E: RulesEngine,
    S: AsRef<str>,
{
    let layouts = replay(start, moves)?;
    Ok(extract_pairs(&layouts, policy))
}
