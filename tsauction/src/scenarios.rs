//! Built-in market definitions.
//!
//! These cover the classic textbook processor-scheduling markets plus a few
//! randomized stress scenarios. Randomized scenarios draw from a seeded
//! generator, so a given `--seed` always reproduces the same market.

use crate::CliError;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tsa_core::models::{AgentSpec, MarketConfig, ValuationSpec, DEFAULT_ROUND_CAP};

/// The names accepted by [`builtin`].
pub const NAMES: &[&str] = &[
    "processor-day",
    "processor-day-two-cpus",
    "many-jobs",
    "unit-demand-duel",
    "complementarity",
    "crowded-out-long-job",
    "urgent-rush",
    "random-jobs",
    "night-discount",
];

/// Looks up a built-in scenario by name.
pub fn builtin(name: &str, seed: u64) -> Result<MarketConfig, CliError> {
    match name {
        "processor-day" => Ok(processor_day(1)),
        "processor-day-two-cpus" => Ok(processor_day(2)),
        "many-jobs" => Ok(many_jobs()),
        "unit-demand-duel" => Ok(unit_demand_duel()),
        "complementarity" => Ok(complementarity()),
        "crowded-out-long-job" => Ok(crowded_out_long_job()),
        "urgent-rush" => Ok(urgent_rush()),
        "random-jobs" => Ok(random_jobs(12, 12, 1.0, seed)),
        "night-discount" => Ok(night_discount(20, seed)),
        _ => Err(CliError::UnknownScenario(name.to_owned())),
    }
}

fn worth(w: f64) -> ValuationSpec {
    ValuationSpec::FixedWorth { worth: w }
}

fn agent(id: u32, deadline: usize, length: usize, valuation: ValuationSpec) -> AgentSpec {
    AgentSpec {
        id,
        deadline,
        length,
        valuation,
    }
}

fn base(slots: usize, reserve: f64, agents: Vec<AgentSpec>) -> MarketConfig {
    MarketConfig {
        slots_per_resource: slots,
        resources: 1,
        reserve_price: reserve,
        reserve_prices: None,
        epsilon: 0.25,
        round_cap: DEFAULT_ROUND_CAP,
        agents,
    }
}

/// An 8-hour workday on one processor: four jobs with mixed deadlines and run
/// lengths compete for hourly slots with a $3 reserve.
fn processor_day(resources: usize) -> MarketConfig {
    let mut config = base(
        8,
        3.0,
        vec![
            agent(1, 3, 2, worth(10.0)),
            agent(2, 2, 2, worth(16.0)),
            agent(3, 2, 1, worth(6.0)),
            agent(4, 7, 4, worth(14.5)),
        ],
    );
    config.resources = resources;
    config
}

/// Eight jobs on the same 8-slot day, enough to contest every window.
fn many_jobs() -> MarketConfig {
    base(
        8,
        3.0,
        vec![
            agent(1, 2, 2, worth(12.0)),
            agent(2, 2, 1, worth(8.0)),
            agent(3, 3, 2, worth(14.0)),
            agent(4, 3, 1, worth(5.0)),
            agent(5, 5, 2, worth(11.0)),
            agent(6, 5, 1, worth(7.0)),
            agent(7, 7, 3, worth(18.0)),
            agent(8, 7, 2, worth(10.0)),
        ],
    )
}

/// Two unit jobs with slot-specific values fighting over the first slot.
fn unit_demand_duel() -> MarketConfig {
    let mut config = base(
        2,
        0.0,
        vec![
            agent(1, 1, 1, ValuationSpec::SlotValues { values: vec![10.0, 4.0] }),
            agent(2, 1, 1, ValuationSpec::SlotValues { values: vec![8.0, 6.0] }),
        ],
    );
    config.epsilon = 1.0;
    config
}

/// A two-slot job and a one-slot job on a two-slot timeline; both cannot win.
fn complementarity() -> MarketConfig {
    base(
        2,
        3.0,
        vec![agent(1, 1, 2, worth(10.0)), agent(2, 1, 1, worth(6.0))],
    )
}

/// Reserve prices (1, 9) let a cheap short job crowd out a long job that
/// would be worth more on its own.
fn crowded_out_long_job() -> MarketConfig {
    let mut config = base(
        2,
        0.0,
        vec![agent(1, 0, 1, worth(3.0)), agent(2, 1, 2, worth(11.0))],
    );
    config.reserve_prices = Some(vec![1.0, 9.0]);
    config.epsilon = 1.0;
    config
}

/// Three urgent unit jobs chase two early slots; a flexible long job idles at
/// the back of the timeline.
fn urgent_rush() -> MarketConfig {
    base(
        4,
        2.0,
        vec![
            agent(1, 1, 1, worth(15.0)),
            agent(2, 1, 1, worth(14.0)),
            agent(3, 1, 1, worth(13.0)),
            agent(4, 3, 2, worth(20.0)),
        ],
    )
}

/// Randomized jobs with lengths 1..=3, random deadlines, and worths a little
/// above the reserve cost of their window.
fn random_jobs(agents: usize, slots: usize, reserve: f64, seed: u64) -> MarketConfig {
    let mut rng = StdRng::seed_from_u64(seed);
    let specs = (0..agents)
        .map(|i| random_agent(&mut rng, i as u32 + 1, slots, reserve))
        .collect();
    base(slots, reserve, specs)
}

// Nighttime covers 10 PM through 6 AM on a midnight-based 24-hour clock.
const NIGHT_OFFSETS: [usize; 8] = [0, 1, 2, 3, 4, 5, 22, 23];

/// A 24-hour day with discounted nighttime reserves and randomized jobs.
fn night_discount(agents: usize, seed: u64) -> MarketConfig {
    let day_reserve = 2.0;
    let night_reserve = 1.0;
    let reserves = (0..24)
        .map(|offset| {
            if NIGHT_OFFSETS.contains(&offset) {
                night_reserve
            } else {
                day_reserve
            }
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let specs = (0..agents)
        .map(|i| random_agent(&mut rng, i as u32 + 1, 24, night_reserve))
        .collect();

    let mut config = base(24, day_reserve, specs);
    config.reserve_prices = Some(reserves);
    config
}

fn random_agent(rng: &mut StdRng, id: u32, slots: usize, reserve: f64) -> AgentSpec {
    let length = rng.random_range(1..=3.min(slots));
    let latest_finish = rng.random_range(length..=slots);
    let floor = reserve * length as f64;
    let w = round_cents(rng.random_range(floor + 1.0..floor + 10.0));
    agent(id, latest_finish - 1, length, worth(w))
}

fn round_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
