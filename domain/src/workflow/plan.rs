//! Plan - ordered queue of pending steps.

use super::step::Step;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Pending steps, executed strictly front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    steps: VecDeque<Step>,
}

impl Plan {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// The step that will run next.
    pub fn front(&self) -> Option<&Step> {
        self.steps.front()
    }

    /// Remove and return the next step.
    pub fn pop_front(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }

    pub fn contains(&self, step: &Step) -> bool {
        self.steps.contains(step)
    }

    /// Append steps not already pending.
    ///
    /// Deduplication is against the steps that were pending before the
    /// call; returns the number of steps actually added.
    pub fn append_unique(&mut self, proposed: Vec<Step>) -> usize {
        let fresh: Vec<Step> = proposed
            .into_iter()
            .filter(|step| !self.steps.contains(step))
            .collect();
        let added = fresh.len();
        self.steps.extend(fresh);
        added
    }

    /// Replace the whole plan.
    pub fn replace(&mut self, steps: Vec<Step>) {
        self.steps = steps.into();
    }

    pub fn to_vec(&self) -> Vec<Step> {
        self.steps.iter().cloned().collect()
    }
}

impl FromIterator<Step> for Plan {
    fn from_iter<T: IntoIterator<Item = Step>>(iter: T) -> Self {
        Plan::new(iter)
    }
}
