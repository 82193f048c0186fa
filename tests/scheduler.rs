mod common;

mod tests {
    use myrtio_lamp_array::{
        ArrayDescriptor, CycleScheduler, Duration, Instant, LampArrayConfig, LampArrayController,
        Rgb,
    };

    use crate::common::{MockDriver, ScriptedSource};

    fn scheduler() -> CycleScheduler<ScriptedSource, MockDriver, 32> {
        let config = LampArrayConfig::reference();
        let descriptor = ArrayDescriptor::new(&config).unwrap();
        let controller =
            LampArrayController::new(descriptor, MockDriver::new(19), config.autonomous_color)
                .unwrap();
        CycleScheduler::new(controller, ScriptedSource::autonomous(19))
    }

    #[test]
    fn test_period_follows_min_update_interval() {
        assert_eq!(scheduler().period(), Duration::from_millis(33));
    }

    #[test]
    fn test_tick_paces_cycles() {
        let mut scheduler = scheduler();

        let timing = scheduler.tick(Instant::from_millis(1_000));
        assert_eq!(timing.next_deadline, Instant::from_millis(1_033));
        assert_eq!(timing.sleep_duration, Duration::from_millis(33));
        assert!(timing.report.is_ok());

        let timing = scheduler.tick(Instant::from_millis(1_040));
        assert_eq!(timing.next_deadline, Instant::from_millis(1_066));
        assert_eq!(timing.sleep_duration, Duration::from_millis(26));
    }

    #[test]
    fn test_tick_resets_after_long_stall() {
        let mut scheduler = scheduler();
        scheduler.tick(Instant::from_millis(0));

        let timing = scheduler.tick(Instant::from_millis(500));
        assert_eq!(timing.next_deadline, Instant::from_millis(533));
        assert_eq!(timing.sleep_duration, Duration::from_millis(33));
    }

    #[test]
    fn test_tick_runs_reconciliation() {
        let mut scheduler = scheduler();
        scheduler.source_mut().mode = myrtio_lamp_array::LampArrayMode::HostControlled;
        scheduler.source_mut().colors[4] = Rgb::new(0, 0, 255);

        let timing = scheduler.tick(Instant::from_millis(0));
        let report = timing.report.unwrap();
        assert_eq!(report.changed, 1);
        assert_eq!(scheduler.source().queries, 1);
        assert_eq!(scheduler.controller().driver().show_count(), 2);
    }
}
