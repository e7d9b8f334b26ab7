//! Per-pawn snapshots of everything the passes read.
//!
//! Reading skills, passions and learning rates through the host for every
//! pawn × work type on every pass is the expensive part of an update.
//! A [`Snapshot`] captures one pawn's view and stays valid for a
//! configurable number of in-game hours. Entries are pulled: a stale or
//! missing entry is rebuilt wholesale at the point of use, never patched.

use std::collections::HashMap;

use autowork_logic::passion::{PassionId, PassionScoreTable};
use autowork_logic::pawn::{PawnClass, PawnFacts, PawnId, Weapon};
use autowork_logic::work::{WorkCatalogExt, WorkTypeId};

use crate::compat::BadWorkSource;
use crate::host::ColonyHost;
use crate::management::ManagementState;

/// A pawn's view of one work type.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkSnapshot {
    /// Floored mean of the relevant skill levels
    pub skill: i32,
    /// Mean learn-rate factor of the relevant skills
    pub learning_rate: f32,
    pub passion: PassionId,
    /// Normalized passion score (0..1)
    pub passion_score: f32,
    pub incapable: bool,
    pub bad_work: bool,
    /// Engine may write this cell (pawn, work type, cell, visibility)
    pub managed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PawnSnapshot {
    pub pawn: PawnId,
    pub class: PawnClass,
    pub capable: bool,
    pub recovering: bool,
    pub weapon: Weapon,
    pub night_owl: bool,
    pub managed: bool,
    pub schedule_managed: bool,
    /// Indexed by [`WorkTypeId`]
    pub work: Vec<WorkSnapshot>,
}

impl PawnSnapshot {
    pub fn work(&self, work_type: WorkTypeId) -> Option<&WorkSnapshot> {
        self.work.get(work_type.index())
    }

    pub fn facts(&self, work_type: WorkTypeId) -> PawnFacts {
        PawnFacts {
            class: self.class,
            recovering: self.recovering,
            work_is_bad: self.work(work_type).map(|w| w.bad_work).unwrap_or(false),
        }
    }
}

/// A cached value and the game hour after which it must be rebuilt.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub valid_until: f64,
    pub data: PawnSnapshot,
}

/// Borrowed inputs a snapshot is built from besides the host.
pub struct SnapshotSources<'a> {
    pub passions: &'a PassionScoreTable,
    pub bad_work: &'a BadWorkSource,
    pub management: &'a ManagementState,
    pub night_owl_trait: &'a str,
}

#[derive(Debug, Clone)]
pub struct AgentSnapshotCache {
    ttl_hours: f64,
    entries: HashMap<PawnId, Snapshot>,
}

impl AgentSnapshotCache {
    pub fn new(ttl_hours: f64) -> Self {
        Self {
            ttl_hours,
            entries: HashMap::new(),
        }
    }

    pub fn ttl_hours(&self) -> f64 {
        self.ttl_hours
    }

    /// Takes effect for entries built from now on.
    pub fn set_ttl(&mut self, ttl_hours: f64) {
        self.ttl_hours = ttl_hours;
    }

    /// The pawn's snapshot, rebuilt first when missing or expired.
    ///
    /// Returns `None` for pawns the host no longer knows.
    pub fn get_or_refresh<H: ColonyHost + ?Sized>(
        &mut self,
        host: &H,
        pawn: PawnId,
        now: f64,
        sources: &SnapshotSources<'_>,
    ) -> Option<&PawnSnapshot> {
        let work_types = host.work_types().len();
        let stale = match self.entries.get(&pawn) {
            None => true,
            Some(entry) => now > entry.valid_until || now + self.ttl_hours < entry.valid_until
                || entry.data.work.len() != work_types,
        };
        if stale {
            let Some(data) = build_snapshot(host, pawn, sources) else {
                self.entries.remove(&pawn);
                return None;
            };
            self.entries.insert(
                pawn,
                Snapshot {
                    valid_until: now + self.ttl_hours,
                    data,
                },
            );
        }
        self.entries.get(&pawn).map(|entry| &entry.data)
    }

    /// Cached entry without refreshing.
    pub fn peek(&self, pawn: PawnId) -> Option<&Snapshot> {
        self.entries.get(&pawn)
    }

    pub fn invalidate(&mut self, pawn: PawnId) {
        self.entries.remove(&pawn);
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    /// Forget pawns missing from the live roster.
    pub fn retain_live(&mut self, live: &[PawnId]) {
        self.entries.retain(|pawn, _| live.contains(pawn));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn floored_mean(levels: &[i32]) -> i32 {
    if levels.is_empty() {
        return 0;
    }
    let sum: i64 = levels.iter().map(|&l| l as i64).sum();
    (sum as f64 / levels.len() as f64).floor() as i32
}

fn build_snapshot<H: ColonyHost + ?Sized>(
    host: &H,
    pawn: PawnId,
    sources: &SnapshotSources<'_>,
) -> Option<PawnSnapshot> {
    let class = host.pawn_class(pawn)?;
    let managed = sources.management.is_pawn_managed(pawn);
    let factors = host.learn_rate_factors(pawn);

    let catalog = host.work_types();
    let work = catalog
        .ids()
        .into_iter()
        .filter_map(|id| catalog.work_type(id).map(|wt| (id, wt)))
        .map(|(id, wt)| {
            let rates: Vec<f32> = wt
                .relevant_skills
                .iter()
                .map(|skill| factors.get(skill).copied().unwrap_or(0.0))
                .collect();
            let learning_rate = if rates.is_empty() {
                0.0
            } else {
                rates.iter().sum::<f32>() / rates.len() as f32
            };
            let passion = host.passion(pawn, id);
            WorkSnapshot {
                skill: floored_mean(&host.relevant_skill_levels(pawn, id)),
                learning_rate,
                passion,
                passion_score: sources.passions.score(passion),
                incapable: host.is_incapable(pawn, id),
                bad_work: sources.bad_work.is_work_bad(pawn, wt),
                managed: managed && wt.visible && sources.management.is_cell_managed(pawn, &wt.name),
            }
        })
        .collect();

    Some(PawnSnapshot {
        pawn,
        class,
        capable: host.is_capable_of_work(pawn),
        recovering: host.is_recovering(pawn),
        weapon: host.weapon(pawn),
        night_owl: host.has_trait(pawn, sources.night_owl_trait),
        managed,
        schedule_managed: sources.management.is_schedule_managed(pawn),
        work,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Colony, PawnSpec};
    use autowork_logic::passion::vanilla_passions;

    fn sources<'a>(
        table: &'a PassionScoreTable,
        bad: &'a BadWorkSource,
        management: &'a ManagementState,
    ) -> SnapshotSources<'a> {
        SnapshotSources {
            passions: table,
            bad_work: bad,
            management,
            night_owl_trait: "NightOwl",
        }
    }

    #[test]
    fn test_floored_mean() {
        assert_eq!(floored_mean(&[]), 0);
        assert_eq!(floored_mean(&[3, 4]), 3);
        assert_eq!(floored_mean(&[10]), 10);
    }

    #[test]
    fn test_snapshot_expires_after_ttl() {
        let mut colony = Colony::vanilla();
        let pawn = colony.spawn(PawnSpec::colonist("Ann").skill("Mining", 5, PassionId::NONE));
        let table = PassionScoreTable::build(&vanilla_passions());
        let bad = BadWorkSource::None;
        let management = ManagementState::new();
        let src = sources(&table, &bad, &management);
        let mining = colony.work_types().id_of("Mining").unwrap();

        let mut cache = AgentSnapshotCache::new(1.0);
        let skill = cache.get_or_refresh(&colony, pawn, 0.0, &src).unwrap().work(mining).unwrap().skill;
        assert_eq!(skill, 5);

        // Host changes are invisible until the entry expires
        let entity = colony.entity(pawn).unwrap();
        colony
            .world
            .get::<&mut crate::components::SkillSet>(entity)
            .unwrap()
            .skills
            .get_mut("Mining")
            .unwrap()
            .level = 12;
        let cached = cache.get_or_refresh(&colony, pawn, 0.5, &src).unwrap().work(mining).unwrap().skill;
        assert_eq!(cached, 5);
        let fresh = cache.get_or_refresh(&colony, pawn, 1.5, &src).unwrap().work(mining).unwrap().skill;
        assert_eq!(fresh, 12);
        assert_eq!(cache.peek(pawn).unwrap().valid_until, 2.5);
    }

    #[test]
    fn test_unknown_pawn_is_dropped() {
        let mut colony = Colony::vanilla();
        let pawn = colony.spawn(PawnSpec::colonist("Ann"));
        let table = PassionScoreTable::build(&vanilla_passions());
        let bad = BadWorkSource::None;
        let management = ManagementState::new();
        let src = sources(&table, &bad, &management);

        let mut cache = AgentSnapshotCache::new(24.0);
        assert!(cache.get_or_refresh(&colony, pawn, 0.0, &src).is_some());
        colony.despawn(pawn);
        cache.invalidate(pawn);
        assert!(cache.get_or_refresh(&colony, pawn, 0.0, &src).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_management_and_visibility_feed_cell_flags() {
        let mut catalog = autowork_logic::defaults::vanilla_work_types();
        catalog.insert(autowork_logic::work::WorkType::new("Secret", 1, &[]).hidden());
        let mut colony = Colony::new(catalog, vanilla_passions());
        let pawn = colony.spawn(PawnSpec::colonist("Ann").incapable_of("Art"));
        let table = PassionScoreTable::build(&vanilla_passions());
        let bad = BadWorkSource::None;
        let mut management = ManagementState::new();
        management.set_work_type_managed("Cooking", false);
        let src = sources(&table, &bad, &management);

        let mut cache = AgentSnapshotCache::new(1.0);
        let snap = cache.get_or_refresh(&colony, pawn, 0.0, &src).unwrap();
        let id = |name: &str| colony.work_types().id_of(name).unwrap();
        assert!(!snap.work(id("Secret")).unwrap().managed);
        assert!(!snap.work(id("Cooking")).unwrap().managed);
        assert!(snap.work(id("Mining")).unwrap().managed);
        assert!(snap.work(id("Art")).unwrap().incapable);
    }
}
