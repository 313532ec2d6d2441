//! Scoring economy: points, answer streaks, streak ammo rewards and the
//! one-off hidden bonus.

use std::collections::BTreeMap;

use tracing::{debug, info};

use mortar_core::config::{HiddenBonus, StreakRewards};
use mortar_core::enums::AmmoKind;
use mortar_core::events::SimEvent;
use mortar_core::state::ScoreView;
use mortar_core::types::Position;

use crate::registry::AmmoInventory;

/// Running score state tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub total: u64,
    pub streak: u32,
    /// Rounds fired per kind. Never reset during a mission.
    pub ammo_use_counters: BTreeMap<AmmoKind, u32>,
    pub bonus_awarded: bool,
    pub rounds_fired: u32,
    pub entities_destroyed: u32,
}

impl ScoreState {
    pub fn view(&self) -> ScoreView {
        ScoreView {
            total: self.total,
            streak: self.streak,
            bonus_awarded: self.bonus_awarded,
            rounds_fired: self.rounds_fired,
            entities_destroyed: self.entities_destroyed,
        }
    }
}

/// Add points and emit the total and the popup delta.
pub fn add_score(
    score: &mut ScoreState,
    points: u32,
    position: Option<Position>,
    events: &mut Vec<SimEvent>,
) {
    score.total += u64::from(points);
    events.push(SimEvent::ScoreChanged { total: score.total });
    events.push(SimEvent::ScoreDelta { points, position });
}

/// Count a fired round toward the hidden bonus, awarding it at most once.
pub fn record_round_fired(
    score: &mut ScoreState,
    ammo: AmmoKind,
    bonus: &HiddenBonus,
    events: &mut Vec<SimEvent>,
) {
    score.rounds_fired += 1;
    let uses = score.ammo_use_counters.entry(ammo).or_insert(0);
    *uses += 1;
    let uses = *uses;

    if ammo == bonus.ammo && !score.bonus_awarded && uses >= bonus.uses_required {
        score.bonus_awarded = true;
        info!(?ammo, uses, points = bonus.points, "hidden bonus awarded");
        events.push(SimEvent::BonusAwarded {
            points: bonus.points,
        });
        add_score(score, bonus.points, None, events);
    }
}

/// Apply a quiz answer to the streak and inventory.
///
/// A correct answer grants one base round and every streak reward whose
/// threshold divides the new streak. A wrong answer resets the streak; the
/// speed penalty on mobile units is applied by the caller.
pub fn apply_answer(
    correct: bool,
    score: &mut ScoreState,
    inventory: &mut AmmoInventory,
    rewards: &StreakRewards,
    events: &mut Vec<SimEvent>,
) {
    if !correct {
        score.streak = 0;
        events.push(SimEvent::StreakChanged { streak: 0 });
        return;
    }

    score.streak += 1;
    events.push(SimEvent::StreakChanged {
        streak: score.streak,
    });
    grant(inventory, AmmoKind::Standard, events);

    let streak = score.streak;
    let hits = |n: u32| n > 0 && streak.is_multiple_of(n);
    if hits(rewards.marking_at) {
        debug!(streak, "streak reward: marking round");
        grant(inventory, AmmoKind::Marking, events);
    }
    if hits(rewards.heavy_at) {
        debug!(streak, "streak reward: heavy round");
        grant(inventory, AmmoKind::Heavy, events);
    }
}

fn grant(inventory: &mut AmmoInventory, ammo: AmmoKind, events: &mut Vec<SimEvent>) {
    let count = inventory.add(ammo, 1);
    events.push(SimEvent::AmmoChanged { ammo, count });
}
