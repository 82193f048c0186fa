//! Report queue between the USB interrupt and the control loop
//!
//! Bounded FIFO built on `critical-section` and `heapless::Deque`. Reports
//! that do not fit are dropped and counted, the USB side never waits.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use heapless::Deque;

use crate::report::HostReport;

/// Error returned when the queue is full, carrying the rejected report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub HostReport);

/// Bounded queue of decoded host reports
pub struct ReportQueue<const SIZE: usize> {
    reports: Mutex<RefCell<Deque<HostReport, SIZE>>>,
    dropped: Mutex<Cell<u32>>,
}

impl<const SIZE: usize> ReportQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            reports: Mutex::new(RefCell::new(Deque::new())),
            dropped: Mutex::new(Cell::new(0)),
        }
    }

    /// Handle for the USB side
    pub const fn sender(&self) -> ReportSender<'_, SIZE> {
        ReportSender { queue: self }
    }

    /// Handle for the control loop
    pub const fn receiver(&self) -> ReportReceiver<'_, SIZE> {
        ReportReceiver { queue: self }
    }

    /// Enqueue a report
    ///
    /// A full queue rejects the report and bumps the drop counter.
    pub fn try_send(&self, report: HostReport) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut reports = self.reports.borrow(cs).borrow_mut();
            reports.push_back(report).map_err(|report| {
                let dropped = self.dropped.borrow(cs);
                dropped.set(dropped.get().saturating_add(1));
                QueueFull(report)
            })
        })
    }

    /// Dequeue the oldest report
    pub fn try_receive(&self) -> Option<HostReport> {
        critical_section::with(|cs| self.reports.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of reports dropped since the last call, resetting the counter
    pub fn take_dropped(&self) -> u32 {
        critical_section::with(|cs| self.dropped.borrow(cs).replace(0))
    }
}

impl<const SIZE: usize> Default for ReportQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of a [`ReportQueue`]
#[derive(Clone, Copy)]
pub struct ReportSender<'a, const SIZE: usize> {
    queue: &'a ReportQueue<SIZE>,
}

impl<const SIZE: usize> ReportSender<'_, SIZE> {
    pub fn try_send(&self, report: HostReport) -> Result<(), QueueFull> {
        self.queue.try_send(report)
    }
}

/// Receiving half of a [`ReportQueue`]
#[derive(Clone, Copy)]
pub struct ReportReceiver<'a, const SIZE: usize> {
    queue: &'a ReportQueue<SIZE>,
}

impl<const SIZE: usize> ReportReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Option<HostReport> {
        self.queue.try_receive()
    }

    pub fn take_dropped(&self) -> u32 {
        self.queue.take_dropped()
    }
}
