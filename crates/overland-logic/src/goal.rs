//! Daily goal policy for autonomous agents.
//!
//! The policy, checked in order each day:
//! 1. A due home binding overrides everything. If the agent is already
//!    standing at home, the visit counts: reset the counter and fall
//!    through. If the bound location cannot be resolved, fall through.
//! 2. A live goal the agent has not reached yet persists.
//! 3. Otherwise the agent needs a fresh wander goal.
//!
//! The functions here only decide; the caller applies counter resets,
//! rolls wander goals, and writes components.

use crate::coords::Coord;

/// Home-binding state relevant to one day's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeCheck {
    /// Resolved home coordinate; `None` when the bound location name is
    /// not registered in the world.
    pub coord: Option<Coord>,
    /// Days since the agent last stood at home.
    pub days_since_home: u32,
    /// Visit cadence: a return is due once the counter reaches this.
    pub return_interval_days: u32,
}

/// What the goal policy decided for one agent on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalDecision {
    /// Head home, overriding any current goal.
    ReturnHome(Coord),
    /// Keep the current goal.
    Keep {
        goal: Coord,
        /// The agent was found standing at home on schedule; zero the
        /// days-since-home counter before traveling on.
        reset_home_counter: bool,
    },
    /// Roll a fresh wander goal.
    Wander { reset_home_counter: bool },
}

/// Decide the day's goal from position, current goal, and home binding.
pub fn select_goal(
    position: Coord,
    current_goal: Option<Coord>,
    home: Option<HomeCheck>,
) -> GoalDecision {
    let mut reset_home_counter = false;
    if let Some(check) = home {
        if check.days_since_home >= check.return_interval_days {
            if let Some(home_coord) = check.coord {
                if position == home_coord {
                    reset_home_counter = true;
                } else {
                    return GoalDecision::ReturnHome(home_coord);
                }
            }
        }
    }
    match current_goal {
        Some(goal) if goal != position => GoalDecision::Keep {
            goal,
            reset_home_counter,
        },
        _ => GoalDecision::Wander { reset_home_counter },
    }
}
