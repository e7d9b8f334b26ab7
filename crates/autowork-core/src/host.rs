//! The host capabilities the engine consumes, and the hecs-backed
//! reference host.
//!
//! The engine never owns pawns. Everything it knows about the colony comes
//! through [`ColonyHost`]; everything it decides goes back through
//! [`ColonyHost::set_priority`] and [`ColonyHost::set_schedule`].

use std::collections::HashMap;

use hecs::{Entity, World};

use autowork_logic::cadence::GameTime;
use autowork_logic::constants::cadence::HOURS_PER_DAY;
use autowork_logic::defaults::vanilla_work_types;
use autowork_logic::passion::{vanilla_passions, PassionId, PassionRegistry};
use autowork_logic::pawn::{PawnClass, PawnId, Weapon};
use autowork_logic::schedule::TimeAssignment;
use autowork_logic::specialization::PatientCounts;
use autowork_logic::work::{WorkCatalog, WorkCatalogExt, WorkTypeId};

use crate::components::*;

/// Read/write access to the simulation the engine manages.
///
/// Queries about a pawn that is no longer alive answer with neutral
/// values (not capable, no skills, priority 0); callers re-enumerate
/// [`ColonyHost::roster`] every pass instead of trusting old ids.
pub trait ColonyHost {
    fn now(&self) -> GameTime;
    fn is_paused(&self) -> bool;

    fn work_types(&self) -> &WorkCatalog;
    fn passions(&self) -> &PassionRegistry;

    /// Live pawns that appear on the work roster, in id order.
    fn roster(&self) -> Vec<PawnId>;

    fn pawn_class(&self, pawn: PawnId) -> Option<PawnClass>;
    fn is_capable_of_work(&self, pawn: PawnId) -> bool;
    fn is_recovering(&self, pawn: PawnId) -> bool;
    fn is_idle(&self, pawn: PawnId) -> bool;
    fn is_incapable(&self, pawn: PawnId, work_type: WorkTypeId) -> bool;

    fn priority(&self, pawn: PawnId, work_type: WorkTypeId) -> u8;
    fn set_priority(&mut self, pawn: PawnId, work_type: WorkTypeId, priority: u8);

    fn relevant_skill_levels(&self, pawn: PawnId, work_type: WorkTypeId) -> Vec<i32>;
    /// Learn-rate factor per skill name.
    fn learn_rate_factors(&self, pawn: PawnId) -> HashMap<String, f32>;
    fn passion(&self, pawn: PawnId, work_type: WorkTypeId) -> PassionId;

    fn weapon(&self, pawn: PawnId) -> Weapon;
    fn has_trait(&self, pawn: PawnId, name: &str) -> bool;
    fn partners(&self, pawn: PawnId) -> Vec<PawnId>;

    /// Pawns needing treatment, by class.
    fn patients(&self) -> PatientCounts;

    fn set_schedule(&mut self, pawn: PawnId, hours: &[TimeAssignment]);

    /// Called once after a pass changed at least one priority.
    fn notify_priorities_changed(&mut self);
}

/// Everything needed to spawn a pawn into a [`Colony`].
#[derive(Debug, Clone)]
pub struct PawnSpec {
    pub name: Name,
    pub class: PawnClass,
    pub skills: SkillSet,
    pub vitals: Vitals,
    pub weapon: Weapon,
    pub traits: Vec<String>,
    /// Work-type names the pawn can never do
    pub incapable: Vec<String>,
    pub idle: bool,
}

impl PawnSpec {
    pub fn new(given: &str, class: PawnClass) -> Self {
        Self {
            name: Name::new(given, ""),
            class,
            skills: SkillSet::default(),
            vitals: Vitals::default(),
            weapon: Weapon::Unarmed,
            traits: Vec::new(),
            incapable: Vec::new(),
            idle: false,
        }
    }

    pub fn colonist(given: &str) -> Self {
        Self::new(given, PawnClass::Colonist)
    }

    /// Add a skill whose learn rate is the vanilla factor of its passion.
    pub fn skill(mut self, name: &str, level: i32, passion: PassionId) -> Self {
        let learn_rate = match passion {
            PassionId::MAJOR => 1.5,
            PassionId::MINOR => 1.0,
            _ => 0.35,
        };
        self.skills = self.skills.with(name, level, passion, learn_rate);
        self
    }

    pub fn skill_with_rate(mut self, name: &str, level: i32, passion: PassionId, learn_rate: f32) -> Self {
        self.skills = self.skills.with(name, level, passion, learn_rate);
        self
    }

    pub fn weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = weapon;
        self
    }

    pub fn vitals(mut self, vitals: Vitals) -> Self {
        self.vitals = vitals;
        self
    }

    pub fn with_trait(mut self, name: &str) -> Self {
        self.traits.push(name.to_string());
        self
    }

    pub fn incapable_of(mut self, work_type: &str) -> Self {
        self.incapable.push(work_type.to_string());
        self
    }

    pub fn idle(mut self, idle: bool) -> Self {
        self.idle = idle;
        self
    }
}

/// Reference host: pawns live as entities in a `hecs::World`.
pub struct Colony {
    /// ECS world containing all pawn entities
    pub world: World,
    index: HashMap<PawnId, Entity>,
    next_id: u32,
    work_types: WorkCatalog,
    passions: PassionRegistry,
    /// Game time in hours since start
    clock: f64,
    paused: bool,
    priority_notifications: u64,
}

impl Colony {
    pub fn new(work_types: WorkCatalog, passions: PassionRegistry) -> Self {
        Self {
            world: World::new(),
            index: HashMap::new(),
            next_id: 1,
            work_types,
            passions,
            clock: 0.0,
            paused: false,
            priority_notifications: 0,
        }
    }

    /// Empty colony with the vanilla work types and passions
    pub fn vanilla() -> Self {
        Self::new(vanilla_work_types(), vanilla_passions())
    }

    pub fn spawn(&mut self, spec: PawnSpec) -> PawnId {
        let id = PawnId(self.next_id);
        self.next_id += 1;

        let incapable = IncapableWork(
            spec.incapable
                .iter()
                .filter_map(|name| self.work_types.id_of(name))
                .collect(),
        );
        let activity = if spec.idle {
            Activity::idle()
        } else {
            Activity::working("Wandering")
        };

        let entity = self.world.spawn((
            Pawn { id },
            spec.name,
            spec.class,
            spec.vitals,
            spec.skills,
            WorkPriorities::disabled(self.work_types.len()),
            incapable,
            activity,
            Equipment { primary: spec.weapon },
            Traits(spec.traits),
            Schedule::default(),
            Relations::default(),
        ));
        self.index.insert(id, entity);
        id
    }

    /// Remove a pawn entirely (left the map, destroyed)
    pub fn despawn(&mut self, pawn: PawnId) -> bool {
        match self.index.remove(&pawn) {
            Some(entity) => self.world.despawn(entity).is_ok(),
            None => false,
        }
    }

    pub fn entity(&self, pawn: PawnId) -> Option<Entity> {
        self.index.get(&pawn).copied()
    }

    pub fn pawn_count(&self) -> usize {
        self.index.len()
    }

    pub fn add_partners(&mut self, a: PawnId, b: PawnId) {
        for (me, other) in [(a, b), (b, a)] {
            if let Some(entity) = self.entity(me) {
                if let Ok(mut relations) = self.world.get::<&mut Relations>(entity) {
                    relations.add_partner(other);
                }
            }
        }
    }

    pub fn set_vitals(&mut self, pawn: PawnId, vitals: Vitals) {
        self.with_component(pawn, |v: &mut Vitals| *v = vitals);
    }

    pub fn set_idle(&mut self, pawn: PawnId, idle: bool) {
        self.with_component(pawn, |a: &mut Activity| {
            *a = if idle {
                Activity::idle()
            } else {
                Activity::working("Wandering")
            }
        });
    }

    pub fn set_class(&mut self, pawn: PawnId, class: PawnClass) {
        self.with_component(pawn, |c: &mut PawnClass| *c = class);
    }

    /// Replace the work catalog (mods added or removed work types)
    pub fn set_work_types(&mut self, work_types: WorkCatalog) {
        let count = work_types.len();
        self.work_types = work_types;
        for (_, priorities) in self.world.query_mut::<&mut WorkPriorities>() {
            priorities.0.resize(count, 0);
        }
    }

    pub fn set_passions(&mut self, passions: PassionRegistry) {
        self.passions = passions;
    }

    pub fn advance(&mut self, hours: f64) {
        if !self.paused {
            self.clock += hours.max(0.0);
        }
    }

    pub fn set_time(&mut self, hours: f64) {
        self.clock = hours.max(0.0);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Hour of day (0-24)
    pub fn hour_of_day(&self) -> f32 {
        (self.clock % HOURS_PER_DAY) as f32
    }

    pub fn priorities_of(&self, pawn: PawnId) -> Vec<u8> {
        self.read(pawn, |p: &WorkPriorities| p.0.clone()).unwrap_or_default()
    }

    pub fn schedule_of(&self, pawn: PawnId) -> Option<Schedule> {
        self.read(pawn, |s: &Schedule| s.clone())
    }

    pub fn name_of(&self, pawn: PawnId) -> Option<String> {
        self.read(pawn, |n: &Name| n.full_name())
    }

    /// How many times the engine reported changed priorities
    pub fn priority_notifications(&self) -> u64 {
        self.priority_notifications
    }

    fn read<C: hecs::Component, T>(&self, pawn: PawnId, f: impl FnOnce(&C) -> T) -> Option<T> {
        let entity = self.entity(pawn)?;
        let component = self.world.get::<&C>(entity).ok()?;
        Some(f(&*component))
    }

    fn with_component<C: hecs::Component>(&mut self, pawn: PawnId, f: impl FnOnce(&mut C)) {
        if let Some(entity) = self.entity(pawn) {
            if let Ok(mut component) = self.world.get::<&mut C>(entity) {
                f(&mut *component);
            }
        }
    }

    fn alive(&self, pawn: PawnId) -> bool {
        self.read(pawn, |v: &Vitals| !v.dead).unwrap_or(false)
    }

    fn relevant_skill_names(&self, work_type: WorkTypeId) -> &[String] {
        self.work_types
            .work_type(work_type)
            .map(|wt| wt.relevant_skills.as_slice())
            .unwrap_or(&[])
    }
}

impl ColonyHost for Colony {
    fn now(&self) -> GameTime {
        GameTime::from_hours(self.clock)
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn work_types(&self) -> &WorkCatalog {
        &self.work_types
    }

    fn passions(&self) -> &PassionRegistry {
        &self.passions
    }

    fn roster(&self) -> Vec<PawnId> {
        let mut pawns: Vec<PawnId> = self
            .world
            .query::<(&Pawn, &PawnClass, &Vitals)>()
            .iter()
            .filter(|(_, (_, class, vitals))| class.is_worker() && !vitals.dead)
            .map(|(_, (pawn, _, _))| pawn.id)
            .collect();
        pawns.sort();
        pawns
    }

    fn pawn_class(&self, pawn: PawnId) -> Option<PawnClass> {
        self.read(pawn, |c: &PawnClass| *c)
    }

    fn is_capable_of_work(&self, pawn: PawnId) -> bool {
        self.read(pawn, |v: &Vitals| v.capable_of_work()).unwrap_or(false)
    }

    fn is_recovering(&self, pawn: PawnId) -> bool {
        self.read(pawn, |v: &Vitals| v.recovering()).unwrap_or(false)
    }

    fn is_idle(&self, pawn: PawnId) -> bool {
        self.alive(pawn) && self.read(pawn, |a: &Activity| a.is_idle()).unwrap_or(false)
    }

    fn is_incapable(&self, pawn: PawnId, work_type: WorkTypeId) -> bool {
        self.read(pawn, |i: &IncapableWork| i.contains(work_type)).unwrap_or(true)
    }

    fn priority(&self, pawn: PawnId, work_type: WorkTypeId) -> u8 {
        self.read(pawn, |p: &WorkPriorities| p.get(work_type)).unwrap_or(0)
    }

    fn set_priority(&mut self, pawn: PawnId, work_type: WorkTypeId, priority: u8) {
        self.with_component(pawn, |p: &mut WorkPriorities| p.set(work_type, priority));
    }

    fn relevant_skill_levels(&self, pawn: PawnId, work_type: WorkTypeId) -> Vec<i32> {
        let names = self.relevant_skill_names(work_type);
        self.read(pawn, |s: &SkillSet| names.iter().map(|n| s.level(n)).collect())
            .unwrap_or_default()
    }

    fn learn_rate_factors(&self, pawn: PawnId) -> HashMap<String, f32> {
        self.read(pawn, |s: &SkillSet| {
            s.skills
                .iter()
                .map(|(name, skill)| (name.clone(), skill.learn_rate))
                .collect()
        })
        .unwrap_or_default()
    }

    /// Strongest passion among the work type's relevant skills.
    fn passion(&self, pawn: PawnId, work_type: WorkTypeId) -> PassionId {
        let names = self.relevant_skill_names(work_type);
        let passions = &self.passions;
        self.read(pawn, |s: &SkillSet| {
            names
                .iter()
                .filter_map(|n| s.get(n))
                .map(|skill| skill.passion)
                .max_by_key(|&id| {
                    let tier = passions.by_index(id.0 as usize).map(|d| d.tier).unwrap_or_default();
                    (tier, id.0)
                })
                .unwrap_or(PassionId::NONE)
        })
        .unwrap_or(PassionId::NONE)
    }

    fn weapon(&self, pawn: PawnId) -> Weapon {
        self.read(pawn, |e: &Equipment| e.primary).unwrap_or_default()
    }

    fn has_trait(&self, pawn: PawnId, name: &str) -> bool {
        self.read(pawn, |t: &Traits| t.has(name)).unwrap_or(false)
    }

    fn partners(&self, pawn: PawnId) -> Vec<PawnId> {
        self.read(pawn, |r: &Relations| r.partners.clone())
            .unwrap_or_default()
            .into_iter()
            .filter(|&p| self.alive(p))
            .collect()
    }

    fn patients(&self) -> PatientCounts {
        let mut counts = PatientCounts::default();
        for (_, (class, vitals)) in self.world.query::<(&PawnClass, &Vitals)>().iter() {
            if !vitals.needs_treatment() {
                continue;
            }
            match class {
                PawnClass::Colonist | PawnClass::Slave => counts.colonists += 1,
                PawnClass::Guest => counts.guests += 1,
                PawnClass::Prisoner => counts.prisoners += 1,
                PawnClass::Animal => counts.animals += 1,
            }
        }
        counts
    }

    fn set_schedule(&mut self, pawn: PawnId, hours: &[TimeAssignment]) {
        self.with_component(pawn, |s: &mut Schedule| s.hours = hours.to_vec());
    }

    fn notify_priorities_changed(&mut self) {
        self.priority_notifications += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_excludes_prisoners_animals_and_dead() {
        let mut colony = Colony::vanilla();
        let a = colony.spawn(PawnSpec::colonist("Ann"));
        let _p = colony.spawn(PawnSpec::new("Pat", PawnClass::Prisoner));
        let _d = colony.spawn(PawnSpec::new("Dog", PawnClass::Animal));
        let g = colony.spawn(PawnSpec::new("Gus", PawnClass::Guest));
        let dead = colony.spawn(PawnSpec::colonist("Ded"));
        colony.set_vitals(
            dead,
            Vitals {
                dead: true,
                ..Default::default()
            },
        );
        assert_eq!(colony.roster(), vec![a, g]);
    }

    #[test]
    fn test_priority_roundtrip_and_despawn() {
        let mut colony = Colony::vanilla();
        let a = colony.spawn(PawnSpec::colonist("Ann"));
        let mining = colony.work_types().id_of("Mining").unwrap();
        colony.set_priority(a, mining, 2);
        assert_eq!(colony.priority(a, mining), 2);
        assert!(colony.despawn(a));
        assert_eq!(colony.priority(a, mining), 0);
        assert!(colony.roster().is_empty());
        assert!(!colony.despawn(a));
    }

    #[test]
    fn test_skill_queries() {
        let mut colony = Colony::vanilla();
        let a = colony.spawn(
            PawnSpec::colonist("Ann")
                .skill("Plants", 7, PassionId::MINOR)
                .skill("Mining", 3, PassionId::MAJOR),
        );
        let growing = colony.work_types().id_of("Growing").unwrap();
        assert_eq!(colony.relevant_skill_levels(a, growing), vec![7]);
        assert_eq!(colony.passion(a, growing), PassionId::MINOR);
        assert_eq!(colony.learn_rate_factors(a)["Mining"], 1.5);
        let hauling = colony.work_types().id_of("Hauling").unwrap();
        assert!(colony.relevant_skill_levels(a, hauling).is_empty());
        assert_eq!(colony.passion(a, hauling), PassionId::NONE);
    }

    #[test]
    fn test_patients_and_partners() {
        let mut colony = Colony::vanilla();
        let hurt = Vitals {
            injured: true,
            ..Default::default()
        };
        let a = colony.spawn(PawnSpec::colonist("Ann").vitals(hurt));
        let b = colony.spawn(PawnSpec::colonist("Bob"));
        colony.spawn(PawnSpec::new("Pat", PawnClass::Prisoner).vitals(hurt));
        colony.add_partners(a, b);

        let patients = colony.patients();
        assert_eq!(patients.colonists, 1);
        assert_eq!(patients.prisoners, 1);
        assert_eq!(colony.partners(b), vec![a]);
        assert!(colony.is_recovering(a));
    }

    #[test]
    fn test_clock_respects_pause() {
        let mut colony = Colony::vanilla();
        colony.advance(30.0);
        assert_eq!(colony.now(), GameTime::new(1, 6.0));
        colony.set_paused(true);
        colony.advance(5.0);
        assert_eq!(colony.now().total_hours(), 30.0);
    }
}
