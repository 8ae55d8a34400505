use proptest::prelude::*;

use pomodoro_timer::{engine::format_remaining, Countdown, ManualScheduler, INITIAL_DURATION};

#[derive(Debug, Clone)]
enum Op {
    Start,
    Stop,
    Reset,
    Advance(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Start),
        Just(Op::Stop),
        Just(Op::Reset),
        (0u64..400).prop_map(Op::Advance),
    ]
}

proptest! {
    #[test]
    fn display_tracks_elapsed_ticks(n in 0u32..=INITIAL_DURATION) {
        let scheduler = ManualScheduler::new();
        let countdown = Countdown::new(scheduler.clone());

        countdown.start();
        scheduler.advance_secs(u64::from(n));

        prop_assert_eq!(countdown.display(), format_remaining(INITIAL_DURATION - n));
        prop_assert_eq!(countdown.is_running(), n < INITIAL_DURATION);
    }

    #[test]
    fn at_most_one_schedule_under_any_sequence(ops in prop::collection::vec(op(), 0..40)) {
        let scheduler = ManualScheduler::new();
        let countdown = Countdown::new(scheduler.clone());

        for op in ops {
            let before = countdown.remaining_seconds();
            let was_running = countdown.is_running();

            match op {
                Op::Start => countdown.start(),
                Op::Stop => countdown.stop(),
                Op::Reset => countdown.reset(),
                Op::Advance(secs) => {
                    scheduler.advance_secs(secs);
                    let expected = if was_running {
                        before.saturating_sub(secs as u32)
                    } else {
                        before
                    };
                    prop_assert_eq!(countdown.remaining_seconds(), expected);
                }
            }

            prop_assert!(countdown.remaining_seconds() <= INITIAL_DURATION);
            prop_assert!(scheduler.active_count() <= 1);
            prop_assert_eq!(countdown.is_running(), scheduler.active_count() == 1);
            if countdown.remaining_seconds() == 0 {
                prop_assert!(!countdown.is_running());
            }
        }

        // One cancellation per registration at most
        prop_assert!(scheduler.cancelled().len() <= scheduler.scheduled().len());
    }
}
