//! Recording mocks shared by the unit tests.

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{interface::Interface, Builder, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Command(u8),
    Data(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Call(Call),
    Reset(bool),
    DelayMs(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BusFault;

#[derive(Default)]
struct State {
    events: Vec<Event>,
    commands_seen: usize,
    data_seen: usize,
    fail_on_command: Option<u8>,
    fail_at_command: Option<usize>,
    fail_at_data: Option<usize>,
}

/// Shared handle onto everything the mocks observed.
#[derive(Clone, Default)]
pub(crate) struct Log(Rc<RefCell<State>>);

impl Log {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn interface(&self) -> MockInterface {
        MockInterface(self.clone())
    }

    pub(crate) fn reset_pin(&self) -> MockResetPin {
        MockResetPin(self.clone())
    }

    pub(crate) fn stuck_reset_pin(&self) -> StuckResetPin {
        StuckResetPin(self.clone())
    }

    pub(crate) fn delay(&self) -> MockDelay {
        MockDelay(self.clone())
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().events.push(event);
    }

    pub(crate) fn clear(&self) {
        let mut state = self.0.borrow_mut();
        state.events.clear();
        state.commands_seen = 0;
        state.data_seen = 0;
    }

    /// Fails every `send_command` carrying `command`.
    pub(crate) fn fail_on_command(&self, command: u8) {
        self.0.borrow_mut().fail_on_command = Some(command);
    }

    /// Fails the `index`-th `send_command` call, counting from zero.
    pub(crate) fn fail_at_command(&self, index: usize) {
        self.0.borrow_mut().fail_at_command = Some(index);
    }

    /// Fails the `index`-th non-empty `send_data` call, counting from zero.
    pub(crate) fn fail_at_data(&self, index: usize) {
        self.0.borrow_mut().fail_at_data = Some(index);
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    /// Protocol calls only, without pin and delay events.
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.0
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                Event::Call(call) => Some(call.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn commands(&self) -> Vec<u8> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Command(command) => Some(command),
                Call::Data(_) => None,
            })
            .collect()
    }

    /// Number of memory writes, i.e. windows programmed.
    pub(crate) fn windows(&self) -> usize {
        self.commands().iter().filter(|&&c| c == 0x2C).count()
    }

    /// Bytes streamed after each memory write command, one entry per window.
    pub(crate) fn streams(&self) -> Vec<Vec<u8>> {
        let mut streams: Vec<Vec<u8>> = Vec::new();
        let mut in_stream = false;
        for call in self.calls() {
            match call {
                Call::Command(0x2C) => {
                    streams.push(Vec::new());
                    in_stream = true;
                }
                Call::Command(_) => in_stream = false,
                Call::Data(bytes) => {
                    if in_stream {
                        if let Some(last) = streams.last_mut() {
                            last.extend_from_slice(&bytes);
                        }
                    }
                }
            }
        }
        streams
    }

    /// Column and row data of each programmed window, as `(x0, x1, y0, y1)`.
    pub(crate) fn window_bounds(&self) -> Vec<(u16, u16, u16, u16)> {
        let calls = self.calls();
        let mut bounds = Vec::new();
        for (i, call) in calls.iter().enumerate() {
            if *call != Call::Command(0x2A) {
                continue;
            }
            if let (Some(Call::Data(cols)), Some(Call::Data(rows))) =
                (calls.get(i + 1), calls.get(i + 3))
            {
                bounds.push((
                    u16::from_be_bytes([cols[0], cols[1]]),
                    u16::from_be_bytes([cols[2], cols[3]]),
                    u16::from_be_bytes([rows[0], rows[1]]),
                    u16::from_be_bytes([rows[2], rows[3]]),
                ));
            }
        }
        bounds
    }
}

pub(crate) struct MockInterface(Log);

impl Interface for MockInterface {
    type Error = BusFault;

    fn send_command(&mut self, command: u8) -> Result<(), BusFault> {
        self.0.push(Event::Call(Call::Command(command)));
        let mut state = self.0 .0.borrow_mut();
        let index = state.commands_seen;
        state.commands_seen += 1;
        if state.fail_on_command == Some(command) || state.fail_at_command == Some(index) {
            return Err(BusFault);
        }
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), BusFault> {
        self.0.push(Event::Call(Call::Data(data.to_vec())));
        if data.is_empty() {
            return Ok(());
        }
        let mut state = self.0 .0.borrow_mut();
        let index = state.data_seen;
        state.data_seen += 1;
        if state.fail_at_data == Some(index) {
            return Err(BusFault);
        }
        Ok(())
    }
}

pub(crate) struct MockResetPin(Log);

impl embedded_hal::digital::ErrorType for MockResetPin {
    type Error = Infallible;
}

impl OutputPin for MockResetPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.push(Event::Reset(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.push(Event::Reset(true));
        Ok(())
    }
}

/// Reset pin whose every level change fails.
pub(crate) struct StuckResetPin(Log);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl embedded_hal::digital::ErrorType for StuckResetPin {
    type Error = PinFault;
}

impl OutputPin for StuckResetPin {
    fn set_low(&mut self) -> Result<(), PinFault> {
        self.0.push(Event::Reset(false));
        Err(PinFault)
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        self.0.push(Event::Reset(true));
        Err(PinFault)
    }
}

pub(crate) struct MockDelay(Log);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::DelayMs(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::DelayMs(ms));
    }
}

pub(crate) type TestDisplay = Display<MockInterface, MockResetPin>;

/// An initialized display with an empty log.
pub(crate) fn display() -> (TestDisplay, Log) {
    let log = Log::new();
    let display = Builder::new(log.interface())
        .reset_pin(log.reset_pin())
        .init(&mut log.delay())
        .unwrap();
    log.clear();
    (display, log)
}
