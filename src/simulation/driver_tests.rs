/*
 * Unit tests for simulation driver
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - test_driver_runs_max_ticks
 *  - test_driver_terminate_interrupts_wait
 *  - test_driver_stops_when_terminate_sender_dropped
 *  - test_driver_survives_failing_tick
 *  - test_driver_injects_random_requests
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod driver_tests {
    use crate::config::SimulationConfig;
    use crate::dispatcher::Dispatcher;
    use crate::shared::Direction::{Idle, Up};
    use crate::shared::{ElevatorSnapshot, FloorRequest, SimRng};
    use crate::simulation::{Simulation, SimulationDriver};
    use crossbeam_channel::{unbounded, Receiver, Sender};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread::Builder;
    use std::time::{Duration, Instant};

    // Panics on its first tick, counts every tick attempt
    struct FlakySimulation {
        ticks: AtomicUsize,
    }

    impl Simulation for FlakySimulation {
        fn tick(&self) {
            if self.ticks.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("simulated failure");
            }
        }

        fn generate_random_request(&self, _max_floor: i32) {}

        fn snapshot(&self) -> Vec<ElevatorSnapshot> {
            Vec::new()
        }

        fn pending_count(&self) -> usize {
            0
        }
    }

    fn setup_driver<S: Simulation>(
        simulation: Arc<S>,
        step_interval_ms: u64,
        random_request_probability: f64,
    ) -> (
        SimulationDriver<S>,
        Receiver<Vec<ElevatorSnapshot>>, // snapshot_rx
        Sender<()>,                      // terminate_tx
    ) {
        let (snapshot_tx, snapshot_rx) = unbounded::<Vec<ElevatorSnapshot>>();
        let (terminate_tx, terminate_rx) = unbounded::<()>();

        let config = SimulationConfig {
            step_interval_ms,
            random_request_probability,
        };

        (
            SimulationDriver::new(
                &config,
                10,
                simulation,
                SimRng::new(7),
                snapshot_tx,
                terminate_rx,
            ),
            snapshot_rx,
            terminate_tx,
        )
    }

    #[test]
    fn test_driver_runs_max_ticks() {
        // Arrange
        let dispatcher = Arc::new(Dispatcher::new(1, SimRng::new(42)));
        dispatcher.submit_request(FloorRequest::new(3, Up));
        let (driver, snapshot_rx, _terminate_tx) = setup_driver(dispatcher.clone(), 1, 0.0);

        // Act
        let ticks = driver.with_max_ticks(Some(3)).run();

        // Assert
        assert_eq!(ticks, 3);
        let snapshots: Vec<Vec<ElevatorSnapshot>> = snapshot_rx.try_iter().collect();
        assert_eq!(snapshots.len(), 3);
        let floors: Vec<i32> = snapshots.iter().map(|s| s[0].current_floor).collect();
        assert_eq!(floors, vec![2, 3, 3]);
        assert_eq!(snapshots[2][0].direction, Idle);
        assert_eq!(dispatcher.pending_count(), 0);
    }

    #[test]
    fn test_driver_terminate_interrupts_wait() {
        // Arrange
        let dispatcher = Arc::new(Dispatcher::new(2, SimRng::new(42)));
        let (driver, snapshot_rx, terminate_tx) = setup_driver(dispatcher, 60_000, 0.0);
        let driver_thread = Builder::new()
            .name("simulation_driver".into())
            .spawn(move || driver.run())
            .unwrap();

        // Act
        snapshot_rx.recv_timeout(Duration::from_secs(3)).unwrap();
        let cancelled_at = Instant::now();
        terminate_tx.send(()).unwrap();
        let ticks = driver_thread.join().unwrap();

        // Assert
        assert_eq!(ticks, 1);
        assert!(cancelled_at.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_driver_stops_when_terminate_sender_dropped() {
        // Arrange
        let dispatcher = Arc::new(Dispatcher::new(2, SimRng::new(42)));
        let (driver, _snapshot_rx, terminate_tx) = setup_driver(dispatcher, 60_000, 0.0);

        // Act
        drop(terminate_tx);
        let ticks = driver.run();

        // Assert
        assert_eq!(ticks, 1);
    }

    #[test]
    fn test_driver_survives_failing_tick() {
        // Arrange
        let simulation = Arc::new(FlakySimulation {
            ticks: AtomicUsize::new(0),
        });
        let (driver, snapshot_rx, _terminate_tx) = setup_driver(simulation.clone(), 1, 0.0);

        // Act
        let ticks = driver.with_max_ticks(Some(3)).run();

        // Assert
        assert_eq!(ticks, 3);
        assert_eq!(simulation.ticks.load(Ordering::SeqCst), 3);
        assert_eq!(snapshot_rx.try_iter().count(), 3);
    }

    #[test]
    fn test_driver_injects_random_requests() {
        // Arrange
        let dispatcher = Arc::new(Dispatcher::new(0, SimRng::new(42)));
        let (driver, _snapshot_rx, _terminate_tx) = setup_driver(dispatcher.clone(), 1, 1.0);

        // Act
        let ticks = driver.with_max_ticks(Some(4)).run();

        // Assert
        assert_eq!(ticks, 4);
        assert_eq!(dispatcher.pending_count(), 4);
    }
}
