use super::*;

/// Back away from a threat for a fixed number of turns.
#[derive(Debug)]
pub struct Retreat {
    threat: EntityId,
    turns_left: u32,
    started: bool,
}

impl Retreat {
    pub fn new(threat: EntityId, turns: u32) -> Self {
        Self { threat, turns_left: turns, started: false }
    }

    pub fn turns_left(&self) -> u32 {
        self.turns_left
    }
}

impl Goal for Retreat {
    fn name(&self) -> &'static str {
        "Retreat"
    }

    fn is_finished(&self, _agent: EntityId, world: &World) -> bool {
        self.turns_left == 0 || !world.actors.contains_key(self.threat)
    }

    fn can_fight(&self) -> bool {
        false
    }

    fn take_action(&mut self, cx: &mut GoalContext<'_>) -> Step {
        let threat = self.threat;
        let Some(threat_pos) = cx.world.position(threat) else {
            return Step::Pop;
        };
        if !self.started {
            self.started = true;
            cx.think(Thought::Retreating { threat });
        }
        if !cx.world.step_away_from(cx.agent, threat_pos) {
            cx.think(Thought::Cornered { threat });
            return Step::Fail(GoalFailure::TargetUnreachable);
        }
        self.turns_left -= 1;
        Step::Continue
    }
}
