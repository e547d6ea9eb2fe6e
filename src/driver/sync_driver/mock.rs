// src/driver/sync_driver/mock.rs

//! Scripted wire shared by the driver tests. The transport and the delay
//! provider log into the same event list so ordering can be asserted.

use crate::common::hal_traits::EzoTransport;
use core::cell::{Cell, RefCell};
use embedded_hal::delay::DelayNs;
use heapless::{Deque, String as HeaplessString, Vec as HeaplessVec};

pub const MAX_EVENTS: usize = 128;

/// What happened on the wire, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Send(HeaplessString<64>),
    DelayMs(u32),
    DelayUs(u32),
    Receive(usize),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockCommError;

/// Replays queued responses; with nothing queued a read returns all `0xFF`
/// like an idle board.
pub struct Wire {
    responses: RefCell<Deque<HeaplessVec<u8, 128>, 32>>,
    events: RefCell<HeaplessVec<Event, MAX_EVENTS>>,
    pub fail_send: Cell<bool>,
}

impl Wire {
    pub fn new() -> Self {
        Wire {
            responses: RefCell::new(Deque::new()),
            events: RefCell::new(HeaplessVec::new()),
            fail_send: Cell::new(false),
        }
    }

    pub fn transport(&self) -> MockTransport<'_> {
        MockTransport { wire: self }
    }

    pub fn delay(&self) -> MockDelay<'_> {
        MockDelay { wire: self }
    }

    /// Queues raw response bytes.
    pub fn stage_raw(&self, raw: &[u8]) {
        let bytes = HeaplessVec::from_slice(raw).unwrap();
        self.responses.borrow_mut().push_back(bytes).unwrap();
    }

    /// Queues a success response: `0x01` followed by the text.
    pub fn stage_ok(&self, text: &str) {
        let mut bytes: HeaplessVec<u8, 128> = HeaplessVec::new();
        bytes.push(0x01).unwrap();
        bytes.extend_from_slice(text.as_bytes()).unwrap();
        self.responses.borrow_mut().push_back(bytes).unwrap();
    }

    pub fn events(&self) -> HeaplessVec<Event, MAX_EVENTS> {
        self.events.borrow().clone()
    }

    /// Commands sent, in order.
    pub fn sent(&self) -> HeaplessVec<HeaplessString<64>, MAX_EVENTS> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Send(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn assert_sent(&self, expected: &[&str]) {
        let sent = self.sent();
        let sent: HeaplessVec<&str, MAX_EVENTS> = sent.iter().map(|s| s.as_str()).collect();
        assert_eq!(sent.as_slice(), expected);
    }

    pub fn receive_count(&self) -> usize {
        self.events.borrow().iter().filter(|e| matches!(e, Event::Receive(_))).count()
    }

    pub fn delays_ms(&self) -> HeaplessVec<u32, MAX_EVENTS> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::DelayMs(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    fn log(&self, event: Event) {
        self.events.borrow_mut().push(event).unwrap();
    }
}

pub struct MockTransport<'w> {
    wire: &'w Wire,
}

impl EzoTransport for MockTransport<'_> {
    type Error = MockCommError;

    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.wire.fail_send.get() {
            return Err(MockCommError);
        }
        let text = core::str::from_utf8(bytes).unwrap();
        self.wire.log(Event::Send(HeaplessString::try_from(text).unwrap()));
        Ok(())
    }

    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        self.wire.log(Event::Receive(buffer.len()));
        match self.wire.responses.borrow_mut().pop_front() {
            Some(raw) => {
                buffer.fill(0x00);
                let n = raw.len().min(buffer.len());
                buffer[..n].copy_from_slice(&raw[..n]);
            }
            None => buffer.fill(0xFF),
        }
        Ok(buffer.len())
    }
}

/// Records delays instead of sleeping.
pub struct MockDelay<'w> {
    wire: &'w Wire,
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.wire.log(Event::DelayMs(ns / 1_000_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.wire.log(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wire.log(Event::DelayMs(ms));
    }
}
