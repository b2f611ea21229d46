// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KvStore;
use crate::errors::{GoalError, Result};
use crate::models::{Contribution, Currency, FetchedRate, Goal};
use crate::storage::{load_goals, save_goals};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

pub type SubscriptionId = u64;

type GoalListener = Box<dyn FnMut(&[Goal])>;
type RateListener = Box<dyn FnMut(&FetchedRate)>;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Owns the goal list and is the only writer to the persisted blob. Every
/// mutation rewrites the blob, then notifies subscribers with the new list.
pub struct GoalStore {
    goals: Vec<Goal>,
    backend: Box<dyn KvStore>,
    listeners: Vec<(SubscriptionId, GoalListener)>,
    next_subscription: SubscriptionId,
}

impl GoalStore {
    pub fn open(backend: Box<dyn KvStore>) -> Self {
        let goals = load_goals(backend.as_ref());
        tracing::debug!(goals = goals.len(), "Goal store opened");
        Self {
            goals,
            backend,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, goal_id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == goal_id)
    }

    /// Looks a goal up by exact id, then by name (trimmed, case-insensitive).
    pub fn find(&self, key: &str) -> Result<&Goal> {
        let key = key.trim();
        if let Some(g) = self.get(key) {
            return Ok(g);
        }
        let wanted = key.to_lowercase();
        let mut hits = self
            .goals
            .iter()
            .filter(|g| g.name.trim().to_lowercase() == wanted);
        match (hits.next(), hits.next()) {
            (Some(g), None) => Ok(g),
            (Some(_), Some(_)) => Err(GoalError::Ambiguous(key.to_string())),
            _ => Err(GoalError::NotFound(key.to_string())),
        }
    }

    pub fn backend(&self) -> &dyn KvStore {
        self.backend.as_ref()
    }

    /// Appends a new goal. Inputs are expected to be validated already.
    pub fn create_goal(&mut self, name: &str, target_amount: Decimal, currency: Currency) -> Goal {
        let goal = Goal {
            id: new_id(),
            name: name.trim().to_string(),
            target_amount,
            currency,
            current_amount: Decimal::ZERO,
            contributions: Vec::new(),
            created_at: Utc::now(),
        };
        self.goals.push(goal.clone());
        self.commit();
        goal
    }

    pub fn add_contribution(
        &mut self,
        goal_id: &str,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Result<Contribution> {
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| GoalError::NotFound(goal_id.to_string()))?;
        let contribution = Contribution {
            id: new_id(),
            amount,
            date,
            goal_id: goal.id.clone(),
        };
        goal.current_amount += amount;
        goal.contributions.push(contribution.clone());
        self.commit();
        Ok(contribution)
    }

    /// Removes the goal and its embedded contributions. `None` if absent.
    pub fn delete_goal(&mut self, goal_id: &str) -> Option<Goal> {
        let idx = self.goals.iter().position(|g| g.id == goal_id)?;
        let removed = self.goals.remove(idx);
        self.commit();
        Some(removed)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&[Goal]) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn commit(&mut self) {
        save_goals(self.backend.as_mut(), &self.goals);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.goals);
        }
    }
}

/// Latest exchange rate, kept apart from goals. Replaced wholesale; the last
/// value handed in wins.
#[derive(Default)]
pub struct RateStore {
    current: Option<FetchedRate>,
    listeners: Vec<(SubscriptionId, RateListener)>,
    next_subscription: SubscriptionId,
}

impl RateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&FetchedRate> {
        self.current.as_ref()
    }

    /// Stores `fetched` as the current rate, then hands the stored value to
    /// every subscriber.
    pub fn replace(&mut self, fetched: FetchedRate) {
        let current = &*self.current.insert(fetched);
        for (_, listener) in self.listeners.iter_mut() {
            listener(current);
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FetchedRate) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }
}
