//! Problem generation and distractor sampling
//!
//! Pure functions of a level and a random source. Nothing here touches
//! session state, so the same seed always yields the same problem.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::level::{Level, OperatorMode};
use crate::consts::{MAX_DISTRACTOR_DRAWS, OPTION_COUNT};

/// Arithmetic operator of a problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }

    /// Subtraction saturates at zero; generated problems never need it to
    pub fn apply(&self, left: u32, right: u32) -> u32 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left.saturating_sub(right),
        }
    }
}

/// One question: two operands, an operator and four candidate answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    left_operand: u32,
    right_operand: u32,
    operator: Operator,
    correct_answer: u32,
    /// Presentation order, fixed for the lifetime of the problem
    options: Vec<u32>,
}

impl Problem {
    pub fn left_operand(&self) -> u32 {
        self.left_operand
    }

    pub fn right_operand(&self) -> u32 {
        self.right_operand
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn correct_answer(&self) -> u32 {
        self.correct_answer
    }

    pub fn options(&self) -> &[u32] {
        &self.options
    }

    pub fn is_correct(&self, option: u32) -> bool {
        option == self.correct_answer
    }

    /// Question text as shown above the bugs, e.g. "7 + 3 = ?"
    pub fn display(&self) -> String {
        format!(
            "{} {} {} = ?",
            self.left_operand,
            self.operator.symbol(),
            self.right_operand
        )
    }
}

/// Generate a problem for `level`
pub fn generate<R: Rng + ?Sized>(level: Level, rng: &mut R) -> Problem {
    let band = level.band();
    let max = band.max();

    let operator = match level.mode() {
        OperatorMode::AddOnly => Operator::Add,
        OperatorMode::SubtractOnly => Operator::Subtract,
        OperatorMode::Mixed => {
            if rng.random_bool(0.5) {
                Operator::Add
            } else {
                Operator::Subtract
            }
        }
    };

    let (left, right) = match operator {
        Operator::Add => {
            // Sum stays within the band
            let left = rng.random_range(1..=max - 1);
            let right = rng.random_range(1..=max - left);
            (left, right)
        }
        Operator::Subtract => {
            let left = rng.random_range(1..=max);
            let right = rng.random_range(1..=left).min(left);
            (left, right)
        }
    };

    let correct_answer = operator.apply(left, right);
    let mut options = sample_options(
        correct_answer,
        band.offset_range(),
        MAX_DISTRACTOR_DRAWS,
        rng,
    );
    options.shuffle(rng);

    Problem {
        left_operand: left,
        right_operand: right,
        operator,
        correct_answer,
        options,
    }
}

/// Collect `answer` plus distinct non-negative distractors near it.
///
/// Rejection-samples offsets in `[-offset_range, offset_range]` for at most
/// `max_draws` draws, then tops up with `answer + k` for the smallest
/// unused `k` (`answer - k` where the sum would overflow). The result is in
/// insertion order; callers shuffle it.
pub(crate) fn sample_options<R: Rng + ?Sized>(
    answer: u32,
    offset_range: u32,
    max_draws: u32,
    rng: &mut R,
) -> Vec<u32> {
    let mut options = Vec::with_capacity(OPTION_COUNT);
    options.push(answer);

    let mut draws = 0;
    while options.len() < OPTION_COUNT && draws < max_draws {
        draws += 1;
        let range = i64::from(offset_range);
        let offset = rng.random_range(-range..=range);
        if offset == 0 {
            continue;
        }
        let Ok(candidate) = u32::try_from(i64::from(answer) + offset) else {
            continue;
        };
        if !options.contains(&candidate) {
            options.push(candidate);
        }
    }

    if options.len() < OPTION_COUNT {
        log::debug!(
            "Distractor sampling hit {} draws for answer {}, filling deterministically",
            max_draws,
            answer
        );
        let mut k: u32 = 1;
        while options.len() < OPTION_COUNT {
            let candidate = answer.checked_add(k).or_else(|| answer.checked_sub(k));
            if let Some(candidate) = candidate.filter(|c| !options.contains(c)) {
                options.push(candidate);
            }
            k += 1;
        }
    }

    options
}
