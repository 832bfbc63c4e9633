//! # Periodic Interrupt Sources
//!
//! Home computers built around the 6502 typically raise an IRQ from a timer
//! (60 Hz on the Commodore machines) to scan the keyboard and blink the cursor.
//! The interpreter does not hard-code that timer. Instead it owns a boxed
//! [`IrqSource`] and asks it, before each fetch, whether an interrupt is due.
//!
//! [`PeriodicIrq`] fires at a fixed period measured on a [`Clock`]. Wall-clock
//! hosts use [`SystemClock`]; deterministic hosts and tests drive a
//! [`ManualClock`] by hand.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Default period of [`PeriodicIrq`]: one sixtieth of a second.
pub const SIXTY_HZ_MICROS: u64 = 1_000_000 / 60;

/// Monotonic time in microseconds.
pub trait Clock {
    /// Microseconds elapsed since an arbitrary fixed origin.
    fn now_micros(&self) -> u64;
}

/// Host wall clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_micros(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }
}

/// Clock advanced explicitly by its owner.
///
/// Clones share the same time, so a host can keep one handle and give the
/// other to a [`PeriodicIrq`].
///
/// ```rust
/// use emu6502::interrupts::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(250);
/// assert_eq!(clock.now_micros(), 250);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `micros`.
    pub fn advance(&self, micros: u64) {
        self.micros.fetch_add(micros, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> u64 {
        self.micros.load(Ordering::Relaxed)
    }
}

/// Decides when the interpreter should take a maskable interrupt.
///
/// The execute loop consults the source only while the I flag is clear, and
/// takes the interrupt whenever it answers `true`. A source that has fired
/// should therefore re-arm itself before returning.
pub trait IrqSource {
    fn irq_due(&mut self) -> bool;
}

/// Source that never interrupts. The default for a new [`Cpu`](crate::Cpu).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIrq;

impl IrqSource for NoIrq {
    fn irq_due(&mut self) -> bool {
        false
    }
}

/// Fixed-period interrupt timer.
///
/// Once a period has elapsed the next poll fires and the period restarts
/// from that moment, so time spent with interrupts disabled delays the
/// interrupt instead of queueing several.
#[derive(Debug, Clone)]
pub struct PeriodicIrq<C: Clock> {
    clock: C,
    period_micros: u64,
    last_fired: u64,
}

impl<C: Clock> PeriodicIrq<C> {
    /// Creates a timer whose first period starts now.
    pub fn new(clock: C, period_micros: u64) -> Self {
        let last_fired = clock.now_micros();
        Self {
            clock,
            period_micros,
            last_fired,
        }
    }

    /// A 60 Hz timer.
    pub fn sixty_hz(clock: C) -> Self {
        Self::new(clock, SIXTY_HZ_MICROS)
    }

    pub fn period_micros(&self) -> u64 {
        self.period_micros
    }
}

impl<C: Clock> IrqSource for PeriodicIrq<C> {
    fn irq_due(&mut self) -> bool {
        let now = self.clock.now_micros();
        if now.saturating_sub(self.last_fired) >= self.period_micros {
            self.last_fired = now;
            true
        } else {
            false
        }
    }
}
