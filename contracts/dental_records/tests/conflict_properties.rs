//! Randomised checks of the 30-minute appointment window rule, run against a
//! live contract.

mod common;

use common::{appointment_input, create_patient, setup_test_env, tomorrow_at_nine};
use dental_records::ContractError;
use proptest::prelude::*;
use proptest_derive::Arbitrary;

const WINDOW: u64 = 30 * 60;

/// Distance between two bookings, in seconds.
#[derive(Clone, Debug, Arbitrary)]
enum Gap {
    Same,
    Inside(#[proptest(strategy = "1u64..WINDOW")] u64),
    Clear(#[proptest(strategy = "WINDOW..(12 * 3_600u64)")] u64),
}

impl Gap {
    fn seconds(&self) -> u64 {
        match self {
            Gap::Same => 0,
            Gap::Inside(s) | Gap::Clear(s) => *s,
        }
    }

    fn overlaps(&self) -> bool {
        !matches!(self, Gap::Clear(_))
    }
}

/// Whether the second booking lands before or after the first.
#[derive(Clone, Copy, Debug, Arbitrary)]
enum Side {
    Before,
    After,
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn second_booking_conflicts_only_inside_window(gap in any::<Gap>(), side in any::<Side>()) {
        let ctx = setup_test_env();
        let patient = create_patient(&ctx, "Jane Roe", "jane@example.com");
        let first = tomorrow_at_nine();
        let second = match side {
            Side::Before => first - gap.seconds(),
            Side::After => first + gap.seconds(),
        };

        ctx.client
            .upsert_appointment(&appointment_input(&ctx.env, &patient, "First", first), &None);
        let result = ctx
            .client
            .try_upsert_appointment(&appointment_input(&ctx.env, &patient, "Second", second), &None);

        if gap.overlaps() {
            prop_assert_eq!(result, Err(Ok(ContractError::SchedulingConflict)));
            prop_assert_eq!(ctx.client.list_appointments().len(), 1);
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(ctx.client.list_appointments().len(), 2);
        }
    }

    #[test]
    fn resubmitting_unchanged_never_conflicts(
        offsets in proptest::collection::vec(0u64..8, 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let ctx = setup_test_env();
        let patient = create_patient(&ctx, "Jane Roe", "jane@example.com");

        // Hourly slots never overlap, so every booking below succeeds
        let mut ids = std::vec::Vec::new();
        let mut used = std::vec::Vec::new();
        for offset in offsets {
            if used.contains(&offset) {
                continue;
            }
            used.push(offset);
            let start = tomorrow_at_nine() + offset * 3_600;
            let saved = ctx
                .client
                .upsert_appointment(&appointment_input(&ctx.env, &patient, "Slot", start), &None);
            ids.push(saved);
        }

        let chosen = pick.get(&ids).clone();
        let resubmit = appointment_input(&ctx.env, &patient, "Slot", chosen.appointment_date);
        let updated = ctx
            .client
            .try_upsert_appointment(&resubmit, &Some(chosen.id.clone()));

        prop_assert!(updated.is_ok());
        prop_assert_eq!(ctx.client.get_appointment(&chosen.id), chosen);
    }
}
