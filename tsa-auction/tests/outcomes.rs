use approx::assert_relative_eq;
use tsa_auction::{verify, AscendingAuction};
use tsa_core::models::{AgentId, AuctionStatus, Bundle, Market, Violation};

use scenarios::*;

fn bundle(resource: usize, start: usize, length: usize) -> Bundle {
    Bundle {
        resource,
        start,
        length,
    }
}

fn assigned(market: &Market, agent: u32) -> Option<Bundle> {
    market.assignment_of(AgentId::from(agent))
}

/// Agent 1 values slot 0 at 10, agent 2 at 8, and agent 2's fallback slot is
/// worth 6 to it. With ε = 1 the price of slot 0 must climb to 9 before agent
/// 2 prefers the fallback: at 8 its surplus on slot 0 is exactly zero and it
/// still insists on the higher-value slot.
#[test]
fn test_unit_demand_duel_exact_run() {
    let mut market = Market::new(unit_demand_duel(1.0)).unwrap();
    let outcome = AscendingAuction::new().run(&mut market);

    assert_eq!(outcome.status, AuctionStatus::Converged);
    assert_eq!(outcome.rounds_used, 10);
    assert_eq!(outcome.prices, vec![9.0, 0.0]);
    assert_eq!(assigned(&market, 1), Some(bundle(0, 0, 1)));
    assert_eq!(assigned(&market, 2), Some(bundle(0, 1, 1)));

    // Until the final round agent 1 holds slot 0 and agent 2 holds nothing.
    for record in &outcome.history[..outcome.history.len() - 1] {
        assert_eq!(record.allocation[&AgentId::from(1)], Some(bundle(0, 0, 1)));
        assert_eq!(record.allocation[&AgentId::from(2)], None);
    }

    assert!(verify(&market).passed);
}

/// The classic inefficiency of slot-by-slot pricing: reserve prices (1, 9)
/// let a 3-unit job buy slot 0 while the 11-unit two-slot job is priced out,
/// even though serving the long job alone would be worth more.
#[test]
fn test_crowded_out_long_job_is_suboptimal() {
    let mut market = Market::new(crowded_out_long_job()).unwrap();
    let outcome = AscendingAuction::new().run(&mut market);

    assert_eq!(outcome.status, AuctionStatus::Converged);
    assert_eq!(outcome.rounds_used, 3);
    assert_eq!(outcome.prices, vec![3.0, 9.0]);
    assert_eq!(assigned(&market, 1), Some(bundle(0, 0, 1)));
    assert_eq!(assigned(&market, 2), None);

    // Converged and verified, yet welfare-dominated by the forgone long job.
    assert!(verify(&market).passed);
    assert_relative_eq!(market.total_valuation(), 3.0);
    let long_job = &market.agents()[1];
    assert_relative_eq!(long_job.value(&bundle(0, 0, 2)), 11.0);
}

#[test]
fn test_processor_day_single_cpu() {
    let mut market = Market::new(processor_day(1)).unwrap();
    let outcome = AscendingAuction::new().run(&mut market);

    assert_eq!(outcome.status, AuctionStatus::Converged);
    assert_eq!(outcome.rounds_used, 14);
    assert_eq!(
        outcome.prices,
        vec![6.25, 6.25, 6.25, 3.25, 3.0, 3.0, 3.0, 3.0]
    );
    assert_eq!(assigned(&market, 1), Some(bundle(0, 2, 2)));
    assert_eq!(assigned(&market, 2), Some(bundle(0, 0, 2)));
    assert_eq!(assigned(&market, 3), None);
    assert_eq!(assigned(&market, 4), Some(bundle(0, 4, 4)));
    assert!(verify(&market).passed);
}

/// Doubling the hardware dissolves the contention: with two timelines every
/// job fits immediately and prices never leave their reserves.
#[test]
fn test_processor_day_two_cpus_clears_at_reserve() {
    let mut market = Market::new(processor_day(2)).unwrap();
    let outcome = AscendingAuction::new().run(&mut market);

    assert_eq!(outcome.status, AuctionStatus::Converged);
    assert_eq!(outcome.rounds_used, 1);
    assert_eq!(outcome.prices, vec![3.0; 16]);
    for agent in market.agents() {
        assert!(assigned(&market, *agent.id()).is_some());
    }
    assert!(verify(&market).passed);
}

/// Three urgent unit jobs chase two early slots; the weakest is priced out at
/// 13.25 while the flexible long job sits untouched at the back.
#[test]
fn test_urgent_rush() {
    let mut market = Market::new(urgent_rush()).unwrap();
    let outcome = AscendingAuction::new().run(&mut market);

    assert_eq!(outcome.status, AuctionStatus::Converged);
    assert_eq!(outcome.rounds_used, 46);
    assert_eq!(outcome.prices, vec![13.25, 13.25, 2.0, 2.0]);
    assert_eq!(assigned(&market, 1), Some(bundle(0, 0, 1)));
    assert_eq!(assigned(&market, 2), Some(bundle(0, 1, 1)));
    assert_eq!(assigned(&market, 3), None);
    assert_eq!(assigned(&market, 4), Some(bundle(0, 2, 2)));
    assert!(verify(&market).passed);
}

/// The two-slot job concedes once the per-slot price passes half its worth,
/// leaving the timeline to the unit job.
#[test]
fn test_complementarity_unit_job_wins() {
    let mut market = Market::new(complementarity()).unwrap();
    let outcome = AscendingAuction::new().run(&mut market);

    assert_eq!(outcome.status, AuctionStatus::Converged);
    assert_eq!(outcome.prices, vec![5.25, 5.25]);
    assert_eq!(assigned(&market, 1), None);
    assert_eq!(assigned(&market, 2), Some(bundle(0, 0, 1)));
    assert!(verify(&market).passed);
}

/// Structurally unsatisfiable jobs ride along as permanent non-demanders:
/// they never block the run and never appear in any allocation.
#[test]
fn test_impossible_jobs_sit_out() {
    let mut market = Market::new(impossible_jobs()).unwrap();
    let outcome = AscendingAuction::new().run(&mut market);

    assert_eq!(outcome.status, AuctionStatus::Converged);
    assert_eq!(outcome.rounds_used, 1);
    assert_eq!(assigned(&market, 1), Some(bundle(0, 0, 1)));
    for record in &outcome.history {
        assert_eq!(record.allocation[&AgentId::from(2)], None);
        assert_eq!(record.allocation[&AgentId::from(3)], None);
    }
    assert!(verify(&market).passed);
}

/// A tiny ε cannot separate the two rivals within 50 rounds, so the run stops
/// at the cap with its over-demand faithfully reported.
#[test]
fn test_round_cap_exceeded_reports_violations() {
    let mut config = unit_demand_duel(0.001);
    config.round_cap = 50;
    let mut market = Market::new(config).unwrap();
    let outcome = AscendingAuction::new().run(&mut market);

    assert_eq!(outcome.status, AuctionStatus::RoundCapExceeded);
    assert_eq!(outcome.rounds_used, 50);
    assert_eq!(outcome.history.len(), 50);

    // Greedy interim allocation: the first claimant keeps the slot.
    assert_eq!(assigned(&market, 1), Some(bundle(0, 0, 1)));
    assert_eq!(assigned(&market, 2), None);

    let report = verify(&market);
    assert!(!report.passed);
    assert!(report.violations.contains(&Violation::ImprovingDeviation {
        agent: AgentId::from(2)
    }));
    assert!(report.violations.contains(&Violation::OverDemand {
        slot: tsa_core::models::SlotIndex::from(0)
    }));
}
