//! Work components: skills, priorities, incapabilities, daily schedule.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use autowork_logic::constants::schedule::HOURS;
use autowork_logic::passion::PassionId;
use autowork_logic::schedule::TimeAssignment;
use autowork_logic::work::WorkTypeId;

/// One skill of a pawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// 0 (untrained) to 20 (legendary)
    pub level: i32,
    pub passion: PassionId,
    /// Multiplier on experience gain for this skill
    pub learn_rate: f32,
}

/// Skills keyed by skill name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    pub skills: BTreeMap<String, Skill>,
}

impl SkillSet {
    pub fn with(mut self, name: &str, level: i32, passion: PassionId, learn_rate: f32) -> Self {
        self.skills.insert(
            name.to_string(),
            Skill {
                level,
                passion,
                learn_rate,
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.skills.get(name)
    }

    /// Level of a skill; unknown skills are untrained
    pub fn level(&self, name: &str) -> i32 {
        self.get(name).map(|s| s.level).unwrap_or(0)
    }
}

/// Per-work-type priority, indexed by [`WorkTypeId`]; 0 = disabled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkPriorities(pub Vec<u8>);

impl WorkPriorities {
    pub fn disabled(work_types: usize) -> Self {
        Self(vec![0; work_types])
    }

    pub fn get(&self, work_type: WorkTypeId) -> u8 {
        self.0.get(work_type.index()).copied().unwrap_or(0)
    }

    pub fn set(&mut self, work_type: WorkTypeId, priority: u8) {
        let idx = work_type.index();
        if idx >= self.0.len() {
            self.0.resize(idx + 1, 0);
        }
        self.0[idx] = priority;
    }

    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|&&p| p > 0).count()
    }
}

/// Work types the pawn can never do (backstory, disability)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncapableWork(pub BTreeSet<WorkTypeId>);

impl IncapableWork {
    pub fn contains(&self, work_type: WorkTypeId) -> bool {
        self.0.contains(&work_type)
    }
}

/// Hourly time assignments for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub hours: Vec<TimeAssignment>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            hours: vec![TimeAssignment::Anything; HOURS],
        }
    }
}

impl Schedule {
    pub fn at(&self, hour: usize) -> TimeAssignment {
        self.hours.get(hour).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priorities_grow_on_set() {
        let mut p = WorkPriorities::disabled(2);
        p.set(WorkTypeId(4), 3);
        assert_eq!(p.0.len(), 5);
        assert_eq!(p.get(WorkTypeId(4)), 3);
        assert_eq!(p.get(WorkTypeId(9)), 0);
        assert_eq!(p.active_count(), 1);
    }

    #[test]
    fn test_skill_lookup() {
        let skills = SkillSet::default().with("Mining", 8, PassionId::MAJOR, 1.5);
        assert_eq!(skills.level("Mining"), 8);
        assert_eq!(skills.level("Art"), 0);
    }
}
