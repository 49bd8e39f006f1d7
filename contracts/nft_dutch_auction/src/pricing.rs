use crate::errors::Error;
use crate::types::PricePhase;
use soroban_sdk::Vec;

/// Price per unit at `elapsed` seconds after the sale opened.
///
/// Deterministic integer arithmetic only, so a buyer can reproduce the exact
/// required payment off-chain. Non-increasing in `elapsed`; the terminal
/// phase holds its floor price indefinitely.
pub fn price_at(phases: &Vec<PricePhase>, elapsed: u64) -> i128 {
    let mut phase_start = 0u64;
    for phase in phases.iter() {
        let phase_end = phase_start + phase.duration;
        if phase.duration == 0 || elapsed < phase_end {
            return step_price(&phase, elapsed - phase_start);
        }
        phase_start = phase_end;
    }
    // Validation guarantees a terminal phase; keep the function total anyway.
    match phases.last() {
        Some(last) => last.floor_price,
        None => 0,
    }
}

/// Phase containing `elapsed`, with its index in the schedule.
pub fn phase_at(phases: &Vec<PricePhase>, elapsed: u64) -> (u32, PricePhase) {
    let mut phase_start = 0u64;
    let mut index = 0u32;
    for phase in phases.iter() {
        let phase_end = phase_start + phase.duration;
        if phase.duration == 0 || elapsed < phase_end {
            return (index, phase);
        }
        phase_start = phase_end;
        index += 1;
    }
    let last = phases.len() - 1;
    (last, phases.get_unchecked(last))
}

/// Validate a schedule supplied at initialization.
///
/// Requires a non-empty, contiguous table whose last (and only last) phase is
/// open-ended, with sane per-phase parameters and a start price in each phase
/// that does not exceed the price reached at the end of the previous one, so
/// the overall schedule never rises.
pub fn validate(phases: &Vec<PricePhase>) -> Result<(), Error> {
    if phases.is_empty() {
        return Err(Error::InvalidConfig);
    }
    let last_index = phases.len() - 1;
    let mut prev_exit_price: Option<i128> = None;
    for (index, phase) in phases.iter().enumerate() {
        let is_last = index as u32 == last_index;
        if (phase.duration == 0) != is_last {
            return Err(Error::InvalidConfig);
        }
        if phase.step_interval == 0 || phase.step_delta < 0 || phase.max_per_call == 0 {
            return Err(Error::InvalidConfig);
        }
        if phase.floor_price < 0 || phase.floor_price > phase.start_price {
            return Err(Error::InvalidConfig);
        }
        if let Some(prev) = prev_exit_price {
            if phase.start_price > prev {
                return Err(Error::InvalidConfig);
            }
        }
        if !is_last {
            prev_exit_price = Some(step_price(&phase, phase.duration - 1));
        }
    }
    Ok(())
}

fn step_price(phase: &PricePhase, within_phase: u64) -> i128 {
    let steps = (within_phase / phase.step_interval) as i128;
    let decayed = phase.start_price - steps * phase.step_delta;
    if decayed > phase.floor_price {
        decayed
    } else {
        phase.floor_price
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{vec, Env, Vec};

    const UNIT: i128 = 10_000_000;

    fn mils(m: i128) -> i128 {
        m * UNIT / 1000
    }

    fn schedule(env: &Env) -> Vec<PricePhase> {
        vec![
            env,
            PricePhase {
                duration: 28_800,
                start_price: mils(1050),
                step_interval: 1800,
                step_delta: mils(50),
                floor_price: mils(300),
                max_per_call: 5,
            },
            PricePhase {
                duration: 57_600,
                start_price: mils(255),
                step_interval: 7200,
                step_delta: mils(15),
                floor_price: mils(150),
                max_per_call: 10,
            },
            PricePhase {
                duration: 0,
                start_price: mils(150),
                step_interval: 43_200,
                step_delta: mils(75),
                floor_price: mils(75),
                max_per_call: 20,
            },
        ]
    }

    #[test]
    fn price_steps_within_first_phase() {
        let env = Env::default();
        let phases = schedule(&env);

        assert_eq!(price_at(&phases, 0), mils(1050));
        assert_eq!(price_at(&phases, 1799), mils(1050));
        assert_eq!(price_at(&phases, 1800), mils(1000));
        assert_eq!(price_at(&phases, 3600), mils(950));
        assert_eq!(price_at(&phases, 19_800), mils(500));
        assert_eq!(price_at(&phases, 27_001), mils(300));
    }

    #[test]
    fn first_phase_floor_holds_until_boundary() {
        let env = Env::default();
        let phases = schedule(&env);

        // 27000s of decay reaches the 0.30 floor before the 8h boundary.
        assert_eq!(price_at(&phases, 27_000), mils(300));
        assert_eq!(price_at(&phases, 28_799), mils(300));
    }

    #[test]
    fn second_phase_starts_at_boundary() {
        let env = Env::default();
        let phases = schedule(&env);

        assert_eq!(price_at(&phases, 28_800), mils(255));
        assert_eq!(price_at(&phases, 28_800 + 7200), mils(240));
        assert_eq!(phase_at(&phases, 28_800).0, 1);
        assert_eq!(phase_at(&phases, 28_799).0, 0);
    }

    #[test]
    fn terminal_phase_holds_floor_forever() {
        let env = Env::default();
        let phases = schedule(&env);

        let terminal_start = 28_800 + 57_600;
        assert_eq!(price_at(&phases, terminal_start), mils(150));
        assert_eq!(price_at(&phases, terminal_start + 43_200), mils(75));
        assert_eq!(price_at(&phases, terminal_start + 10 * 43_200), mils(75));
        assert_eq!(price_at(&phases, 10 * 365 * 24 * 3600), mils(75));
        assert_eq!(phase_at(&phases, u64::MAX / 2).0, 2);
    }

    #[test]
    fn price_is_non_increasing() {
        let env = Env::default();
        let phases = schedule(&env);

        let mut last = i128::MAX;
        let mut elapsed = 0u64;
        while elapsed < 200_000 {
            let price = price_at(&phases, elapsed);
            assert!(price <= last, "price rose at elapsed={}", elapsed);
            assert!(price >= mils(75));
            last = price;
            elapsed += 113; // off the step cadence on purpose
        }
    }

    #[test]
    fn validate_accepts_default_schedule() {
        let env = Env::default();
        assert_eq!(validate(&schedule(&env)), Ok(()));
    }

    #[test]
    fn validate_rejects_bad_schedules() {
        let env = Env::default();

        let empty: Vec<PricePhase> = vec![&env];
        assert_eq!(validate(&empty), Err(Error::InvalidConfig));

        // Finite last phase: schedule has no terminal price.
        let mut no_terminal = schedule(&env);
        let mut last = no_terminal.get_unchecked(2);
        last.duration = 3600;
        no_terminal.set(2, last);
        assert_eq!(validate(&no_terminal), Err(Error::InvalidConfig));

        // Floor above the start price.
        let mut bad_floor = schedule(&env);
        let mut first = bad_floor.get_unchecked(0);
        first.floor_price = first.start_price + 1;
        bad_floor.set(0, first);
        assert_eq!(validate(&bad_floor), Err(Error::InvalidConfig));

        // Second phase opens above where the first one ended.
        let mut rising = schedule(&env);
        let mut second = rising.get_unchecked(1);
        second.start_price = mils(400);
        rising.set(1, second);
        assert_eq!(validate(&rising), Err(Error::InvalidConfig));

        // Zero step interval.
        let mut zero_step = schedule(&env);
        let mut first = zero_step.get_unchecked(0);
        first.step_interval = 0;
        zero_step.set(0, first);
        assert_eq!(validate(&zero_step), Err(Error::InvalidConfig));
    }
}
