//! Integration tests: exercise full sessions against a simulated keyboard.
//!
//! The simulated keyboard exposes the usual sibling interfaces next to the
//! raw HID one, so every test goes through discovery, open, the command
//! sequence and close.

#[cfg(test)]
mod tests {
    use crate::color::Rgb;
    use crate::config::{parse_config, ControllerConfig};
    use crate::controller::Controller;
    use crate::device::DeviceDescriptor;
    use crate::error::Error;
    use crate::lighting::{InputWarning, LightingState, NotificationMode};
    use crate::protocol::REPORT_LEN;
    use crate::transport::mock::{alt_raw_descriptor, MockBackend};
    use std::time::Duration;

    fn sibling(usage_page: u16, usage: u16, path: &str) -> DeviceDescriptor {
        DeviceDescriptor {
            usage_page,
            usage,
            path: path.to_string(),
            ..alt_raw_descriptor()
        }
    }

    /// A keyboard with boot keyboard, consumer control and raw interfaces.
    fn simulated_alt() -> MockBackend {
        MockBackend::new(vec![
            sibling(0x0001, 0x06, "/dev/hidraw1"),
            sibling(0x000C, 0x01, "/dev/hidraw2"),
            alt_raw_descriptor(),
        ])
    }

    fn padded(prefix: &[u8]) -> Vec<u8> {
        let mut v = prefix.to_vec();
        v.resize(REPORT_LEN, 0);
        v
    }

    /// Test: query, change state, animate, color, close.
    #[test]
    fn full_session() {
        let backend = simulated_alt();
        let mut ctl = Controller::connect(&backend, ControllerConfig::default()).unwrap();
        assert_eq!(backend.opened(), vec!["/dev/hidraw3".to_string()]);

        backend.transport.queue_read(&[0x01]);
        assert_eq!(ctl.get_state().unwrap(), LightingState::AllOn);

        ctl.set_state(LightingState::UnderOnly).unwrap();
        ctl.next_animation().unwrap();
        ctl.set_color(Rgb::new(255, 50, 0)).unwrap();
        ctl.close();

        let writes = backend.transport.writes();
        assert!(writes.iter().all(|w| w.len() == REPORT_LEN));
        assert_eq!(
            writes,
            vec![
                padded(&[0x03]),
                padded(&[0x01, 0x03]),
                padded(&[0x01, 0x05]),
                padded(&[0x02, 0x02, 255, 50, 0]),
            ]
        );
        assert!(matches!(
            ctl.set_state(LightingState::AllOn),
            Err(Error::HandleClosed)
        ));
    }

    /// Test: every notification zone restores the state captured before it.
    #[test]
    fn notification_in_every_zone() {
        let backend = simulated_alt();
        let mut ctl = Controller::connect(&backend, ControllerConfig::default()).unwrap();

        for (mode, sub, prior) in [
            (NotificationMode::Bottom, 0x01, 0x04),
            (NotificationMode::Full, 0x02, 0x02),
            (NotificationMode::Under, 0x03, 0x03),
        ] {
            backend.transport.queue_read(&[prior]);
            ctl.send_notification(mode, Rgb::new(0, 255, 0), Duration::ZERO)
                .unwrap();
            let writes = backend.transport.writes();
            let tail = &writes[writes.len() - 3..];
            assert_eq!(tail[0], padded(&[0x03]));
            assert_eq!(tail[1], padded(&[0x02, sub, 0, 255, 0]));
            assert_eq!(tail[2], padded(&[0x01, prior]));
        }
        assert!(ctl.is_open());
    }

    /// Test: bad convenience input never aborts the command.
    #[test]
    fn permissive_inputs_still_reach_the_device() {
        let backend = simulated_alt();
        let mut ctl = Controller::connect(&backend, ControllerConfig::default()).unwrap();

        backend.transport.queue_read(&[0x01]);
        let warnings = ctl
            .send_notification_named("everywhere", "ultraviolet", Duration::ZERO)
            .unwrap();
        assert_eq!(
            warnings,
            vec![
                InputWarning::InvalidNotificationMode {
                    mode: "everywhere".into()
                },
                InputWarning::UnknownColorName {
                    name: "ultraviolet".into()
                },
            ]
        );

        let warnings = ctl.set_color_rgb(0, 0, 256).unwrap();
        assert_eq!(warnings.len(), 1);

        let writes = backend.transport.writes();
        assert_eq!(writes.len(), 4);
        assert_eq!(writes[1], padded(&[0x02, 0x02, 255, 255, 255]));
        assert_eq!(writes[2], padded(&[0x01, 0x01]));
        assert_eq!(writes[3], padded(&[0x02, 0x02, 255, 255, 255]));
    }

    /// Test: a configured selector and palette drive discovery and colors.
    #[test]
    fn configured_board_and_palette() {
        let config: ControllerConfig = parse_config(
            r##"{
                "selector": { "vendor_id": 1240, "product_id": 61139, "usage_page": 1, "usage": 6 },
                "palette": { "Teal": "#008080" }
            }"##,
        )
        .unwrap();
        let backend = simulated_alt();
        let mut ctl = Controller::connect(&backend, config).unwrap();
        assert_eq!(backend.opened(), vec!["/dev/hidraw1".to_string()]);

        assert!(ctl.set_color_name("teal").unwrap().is_empty());
        assert_eq!(
            backend.transport.writes(),
            vec![padded(&[0x02, 0x02, 0x00, 0x80, 0x80])]
        );
    }

    /// Test: a board that is not plugged in is reported, not exited on.
    #[test]
    fn missing_board_is_a_typed_error() {
        let backend = MockBackend::new(vec![
            sibling(0x0001, 0x06, "/dev/hidraw1"),
            sibling(0x000C, 0x01, "/dev/hidraw2"),
        ]);
        let result = Controller::connect(&backend, ControllerConfig::default());
        assert!(matches!(result, Err(Error::DeviceNotFound(_))));
        assert!(backend.opened().is_empty());
    }

    /// Test: a controller moved behind a mutex keeps the notification and
    /// a later command on another thread in order.
    #[test]
    fn controller_shared_behind_mutex() {
        use std::sync::{Arc, Mutex};
        use std::thread;

        let backend = simulated_alt();
        let ctl = Controller::connect(&backend, ControllerConfig::default()).unwrap();
        let ctl = Arc::new(Mutex::new(ctl));
        backend.transport.queue_read(&[0x02]);

        let notifier = {
            let ctl = Arc::clone(&ctl);
            thread::spawn(move || {
                ctl.lock()
                    .unwrap()
                    .send_notification(NotificationMode::Full, Rgb::WHITE, Duration::from_millis(20))
                    .unwrap();
            })
        };
        notifier.join().expect("thread panicked");
        let setter = {
            let ctl = Arc::clone(&ctl);
            thread::spawn(move || ctl.lock().unwrap().set_state(LightingState::AllOff).unwrap())
        };
        setter.join().expect("thread panicked");

        let writes = backend.transport.writes();
        assert_eq!(writes.len(), 4);
        assert_eq!(writes[2], padded(&[0x01, 0x02]));
        assert_eq!(writes[3], padded(&[0x01, 0x04]));
    }
}
