//! Per-agent goal stacks and the poll loop that drives them.
//! This module exists to give every behavior the same push, pop and fail-upward protocol.
//! It does not own any concrete behavior; those live in `goals` or in the host.

use std::fmt;

use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::options::Options;
use crate::types::*;
use crate::world::World;

/// Everything a goal may touch while it acts.
pub struct GoalContext<'a> {
    pub agent: EntityId,
    pub world: &'a mut World,
    pub options: &'a Options,
}

impl GoalContext<'_> {
    pub fn think(&mut self, thought: Thought) {
        self.world.think(self.agent, thought);
    }
}

/// What a goal wants done after one action step.
pub enum Step {
    /// Stay on top and act again next poll.
    Continue,
    /// Push children, last one on top. An empty list behaves like `Continue`.
    Push(Vec<Box<dyn Goal>>),
    /// Done; remove self without failing.
    Pop,
    /// Give up and hand control back to the parent.
    Fail(GoalFailure),
}

impl Step {
    pub fn push(goal: impl Goal + 'static) -> Self {
        Step::Push(vec![Box::new(goal)])
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Continue => f.write_str("Continue"),
            Step::Push(goals) => {
                f.debug_list().entries(goals.iter().map(|goal| goal.name())).finish()
            }
            Step::Pop => f.write_str("Pop"),
            Step::Fail(failure) => f.debug_tuple("Fail").field(failure).finish(),
        }
    }
}

/// A unit of agent behavior. Host-defined goals implement the same trait.
pub trait Goal: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Checked when the goal is pushed and again before every poll.
    fn can_run(&self, _agent: EntityId, _world: &World) -> bool {
        true
    }

    fn is_finished(&self, agent: EntityId, world: &World) -> bool;

    /// Whether the agent may break off to fight while this goal is on top.
    fn can_fight(&self) -> bool {
        true
    }

    fn take_action(&mut self, cx: &mut GoalContext<'_>) -> Step;

    /// Runs once when this goal fails; a returned goal is pushed onto the parent's stack.
    fn on_fail(&mut self, _cx: &mut GoalContext<'_>) -> Option<Box<dyn Goal>> {
        None
    }

    /// Runs once on the new top after a child failed.
    fn on_child_failed(&mut self, _cx: &mut GoalContext<'_>, _failure: GoalFailure) {}
}

#[derive(Debug, Default)]
pub struct GoalStack {
    goals: Vec<Box<dyn Goal>>,
}

impl GoalStack {
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn top(&self) -> Option<&dyn Goal> {
        self.goals.last().map(|goal| goal.as_ref())
    }

    /// Goal names from bottom to top.
    pub fn names(&self) -> Vec<&'static str> {
        self.goals.iter().map(|goal| goal.name()).collect()
    }

    fn push(&mut self, goal: Box<dyn Goal>) {
        self.goals.push(goal);
    }

    fn pop(&mut self) -> Option<Box<dyn Goal>> {
        self.goals.pop()
    }

    fn top_mut(&mut self) -> Option<&mut Box<dyn Goal>> {
        self.goals.last_mut()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing on the stack.
    Idle,
    /// The top goal could no longer run and removed itself.
    Rejected,
    /// The top goal was already satisfied and was popped.
    Finished,
    Continued,
    Pushed(usize),
    Popped,
    Failed(GoalFailure),
}

/// Owns one goal stack per agent. Stacks are created lazily and dropped with their agent.
#[derive(Debug, Default)]
pub struct Planner {
    stacks: SecondaryMap<EntityId, GoalStack>,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack(&self, agent: EntityId) -> Option<&GoalStack> {
        self.stacks.get(agent)
    }

    pub fn depth(&self, agent: EntityId) -> usize {
        self.stacks.get(agent).map_or(0, GoalStack::len)
    }

    pub fn is_idle(&self, agent: EntityId) -> bool {
        self.depth(agent) == 0
    }

    /// Whether the agent may fight under its current top goal. Idle agents always may.
    pub fn can_fight(&self, agent: EntityId) -> bool {
        self.stacks.get(agent).and_then(GoalStack::top).is_none_or(|goal| goal.can_fight())
    }

    /// Pushes `goal` unless it cannot run for this agent. Returns whether it was pushed.
    pub fn push_goal(&mut self, agent: EntityId, goal: Box<dyn Goal>, world: &mut World) -> bool {
        if !world.actors.contains_key(agent) {
            return false;
        }
        if !goal.can_run(agent, world) {
            trace!(?agent, goal = goal.name(), "goal rejected at push");
            world.record(LogEvent::GoalRejected { agent, goal: goal.name() });
            return false;
        }
        debug!(?agent, goal = goal.name(), "goal pushed");
        world.record(LogEvent::GoalPushed { agent, goal: goal.name() });
        if !self.stacks.contains_key(agent) {
            self.stacks.insert(agent, GoalStack::default());
        }
        if let Some(stack) = self.stacks.get_mut(agent) {
            stack.push(goal);
        }
        true
    }

    pub fn pop(&mut self, agent: EntityId, world: &mut World) -> Option<Box<dyn Goal>> {
        let goal = self.stacks.get_mut(agent)?.pop()?;
        world.record(LogEvent::GoalPopped { agent, goal: goal.name() });
        Some(goal)
    }

    /// Advances the agent's top goal by one step.
    pub fn poll(&mut self, agent: EntityId, world: &mut World, options: &Options) -> PollOutcome {
        if !world.actors.contains_key(agent) {
            self.forget(agent);
            return PollOutcome::Idle;
        }
        let Some(stack) = self.stacks.get_mut(agent) else {
            return PollOutcome::Idle;
        };
        let Some(top) = stack.top_mut() else {
            return PollOutcome::Idle;
        };

        if !top.can_run(agent, world) {
            let name = top.name();
            stack.pop();
            trace!(?agent, goal = name, "goal can no longer run");
            world.record(LogEvent::GoalRejected { agent, goal: name });
            return PollOutcome::Rejected;
        }
        if top.is_finished(agent, world) {
            self.pop(agent, world);
            return PollOutcome::Finished;
        }

        let mut cx = GoalContext { agent, world, options };
        let step = top.take_action(&mut cx);
        trace!(?agent, goal = top.name(), ?step, "goal acted");
        match step {
            Step::Continue => PollOutcome::Continued,
            Step::Push(children) => {
                let mut pushed = 0;
                for child in children {
                    if self.push_goal(agent, child, world) {
                        pushed += 1;
                    }
                }
                if pushed == 0 { PollOutcome::Continued } else { PollOutcome::Pushed(pushed) }
            }
            Step::Pop => {
                self.pop(agent, world);
                PollOutcome::Popped
            }
            Step::Fail(failure) => {
                self.fail_to_parent(agent, failure, world, options);
                PollOutcome::Failed(failure)
            }
        }
    }

    /// Pops the top goal as failed, lets the new top react once, then pushes any fallback the
    /// failed goal asked for.
    pub fn fail_to_parent(
        &mut self,
        agent: EntityId,
        failure: GoalFailure,
        world: &mut World,
        options: &Options,
    ) {
        let Some(mut failed) = self.stacks.get_mut(agent).and_then(GoalStack::pop) else {
            return;
        };
        debug!(?agent, goal = failed.name(), ?failure, "goal failed");
        world.record(LogEvent::GoalFailed { agent, goal: failed.name(), failure });

        let mut cx = GoalContext { agent, world, options };
        if let Some(parent) = self.stacks.get_mut(agent).and_then(GoalStack::top_mut) {
            parent.on_child_failed(&mut cx, failure);
        }
        if let Some(fallback) = failed.on_fail(&mut cx) {
            self.push_goal(agent, fallback, world);
        }
    }

    /// Drops every goal the agent had, as on death or an external interrupt.
    pub fn reset(&mut self, agent: EntityId) {
        if let Some(stack) = self.stacks.get_mut(agent) {
            stack.goals.clear();
        }
    }

    /// Discards the agent's stack entirely once it has left the simulation.
    pub fn forget(&mut self, agent: EntityId) {
        self.stacks.remove(agent);
    }

    /// Agents that currently have at least one goal, in key order.
    pub fn busy_agents(&self) -> Vec<EntityId> {
        self.stacks.iter().filter(|(_, stack)| !stack.is_empty()).map(|(id, _)| id).collect()
    }
}
