//! Staff system - morale, task progress, and mistakes during service

use crate::components::{Staff, StaffTask, TaskKind};
use havencafe_logic::staffing::StaffRole;
use hecs::{Entity, World};
use rand::Rng;

/// Something a staff member did this tick.
#[derive(Debug, Clone)]
pub enum StaffEvent {
    TaskCompleted {
        entity: Entity,
        staff_id: String,
        name: String,
        task: StaffTask,
    },
    Mistake {
        entity: Entity,
        staff_id: String,
        message: String,
    },
}

/// Tick all staff: task progress plus morale decay while the cafe is in
/// service.
pub fn staff_system(
    world: &mut World,
    dt_hours: f32,
    in_service: bool,
    rng: &mut impl Rng,
) -> Vec<StaffEvent> {
    let mut events = Vec::new();
    for (entity, staff) in world.query_mut::<&mut Staff>() {
        if in_service {
            staff.decay_morale(dt_hours);
        }
        let turn = staff.tick(dt_hours, rng);
        if let Some(message) = turn.mistake {
            events.push(StaffEvent::Mistake {
                entity,
                staff_id: staff.id.clone(),
                message,
            });
        }
        if let Some(task) = turn.completed {
            events.push(StaffEvent::TaskCompleted {
                entity,
                staff_id: staff.id.clone(),
                name: staff.name.clone(),
                task,
            });
        }
    }
    events
}

/// Find an idle staff member with the given role.
pub fn idle_staff_with_role(world: &World, role: StaffRole) -> Option<Entity> {
    world
        .query::<&Staff>()
        .iter()
        .find(|(_, staff)| staff.role == role && !staff.is_busy())
        .map(|(entity, _)| entity)
}

/// Current efficiency of any staff member with the role, or 1.0 if the
/// roster has none.
pub fn role_efficiency(world: &World, role: StaffRole) -> f32 {
    world
        .query::<&Staff>()
        .iter()
        .find(|(_, staff)| staff.role == role)
        .map_or(1.0, |(_, staff)| staff.efficiency())
}

/// Quality bonus of any staff member with the role, or 1.0.
pub fn role_quality_bonus(world: &World, role: StaffRole) -> f32 {
    world
        .query::<&Staff>()
        .iter()
        .find(|(_, staff)| staff.role == role)
        .map_or(1.0, |(_, staff)| staff.quality_bonus())
}

/// Customer ids whose orders a chef is already cooking.
pub fn claimed_customer_ids(world: &World) -> Vec<u32> {
    world
        .query::<&Staff>()
        .iter()
        .filter_map(|(_, staff)| staff.task.as_ref())
        .filter(|task| task.kind == TaskKind::Cook)
        .filter_map(|task| task.customer)
        .collect()
}

/// Overnight recovery for the whole roster.
pub fn recover_staff_overnight(world: &mut World) {
    for (_, staff) in world.query_mut::<&mut Staff>() {
        staff.overnight_recovery();
    }
}
