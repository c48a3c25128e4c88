//! Nested wall-clock timers for the solve phases.
//!
//! Timers are keyed by static names and nest according to the order in
//! which they are started, so that a "solve" timer started while "total"
//! is running is recorded as a child of "total".

use std::collections::HashMap;
use std::io::Write;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct InnerTimer {
    start: Option<Instant>,
    elapsed: Duration,
    subtimers: SubTimersMap,
}

impl InnerTimer {
    fn reset(&mut self) {
        self.start = None;
        self.elapsed = Duration::ZERO;
        self.subtimers.clear();
    }

    fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    fn stop(&mut self) {
        if let Some(instant) = self.start.take() {
            self.elapsed += instant.elapsed();
        }
    }
}

#[derive(Debug, Default)]
struct SubTimersMap(HashMap<&'static str, InnerTimer>);

impl Deref for SubTimersMap {
    type Target = HashMap<&'static str, InnerTimer>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for SubTimersMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl SubTimersMap {
    fn start_subtimer(&mut self, key: &'static str) {
        self.entry(key).or_default().start();
    }

    fn total_time(&self) -> Duration {
        self.values().fold(Duration::ZERO, |acc, t| acc + t.elapsed)
    }

    fn print(&self, out: &mut dyn Write, depth: usize) -> std::io::Result<()> {
        // sorted so that output is reproducible
        let mut keys: Vec<_> = self.keys().collect();
        keys.sort();
        for key in keys {
            let t = &self[key];
            writeln!(out, "{:indent$}{} : {:?}", "", key, t.elapsed, indent = 4 * depth)?;
            t.subtimers.print(out, depth + 1)?;
        }
        Ok(())
    }
}

/// A collection of nested, named timers
#[derive(Default, Debug)]
pub struct Timers {
    stack: Vec<&'static str>,
    subtimers: SubTimersMap,
}

impl Timers {
    fn mut_active_timer(&mut self) -> Option<&mut InnerTimer> {
        let (first, rest) = self.stack.split_first()?;

        let mut active = self.subtimers.get_mut(first)?;
        for key in rest {
            active = active.subtimers.get_mut(key)?;
        }
        Some(active)
    }

    /// clears a top level timer and all of its children
    pub fn reset_timer(&mut self, key: &'static str) {
        self.subtimers.entry(key).or_default().reset();
    }

    /// starts a timer as a child of the currently active one
    pub fn start_as_current(&mut self, key: &'static str) {
        match self.mut_active_timer() {
            Some(active) => active.subtimers.start_subtimer(key),
            None => self.subtimers.start_subtimer(key),
        }
        self.stack.push(key);
    }

    /// stops the most recently started timer
    pub fn stop_current(&mut self) {
        if let Some(active) = self.mut_active_timer() {
            active.stop();
        }
        self.stack.pop();
    }

    /// elapsed time of the timer at the given nesting path, e.g.
    /// `&["total", "factor"]`.  Unknown timers report zero.
    pub fn elapsed(&self, path: &[&'static str]) -> Duration {
        let Some((first, rest)) = path.split_first() else {
            return self.total_time();
        };
        let mut timer = match self.subtimers.get(first) {
            Some(t) => t,
            None => return Duration::ZERO,
        };
        for key in rest {
            timer = match timer.subtimers.get(key) {
                Some(t) => t,
                None => return Duration::ZERO,
            };
        }
        timer.elapsed
    }

    /// sum of all top level timers
    pub fn total_time(&self) -> Duration {
        self.subtimers.total_time()
    }

    pub fn print(&self, out: &mut dyn Write) -> std::io::Result<()> {
        self.subtimers.print(out, 0)
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_timers() {
        let mut timers = Timers::default();

        timeit! {timers => "total";
            timeit! {timers => "factor";
                std::thread::sleep(Duration::from_millis(2));
            }
            timeit! {timers => "solve";
                let _x = 1;
            }
        }

        let total = timers.elapsed(&["total"]);
        let factor = timers.elapsed(&["total", "factor"]);
        assert!(factor >= Duration::from_millis(2));
        assert!(total >= factor);
        assert_eq!(timers.total_time(), total);
        assert_eq!(timers.elapsed(&["total", "nope"]), Duration::ZERO);
        assert_eq!(timers.elapsed(&["nope"]), Duration::ZERO);

        let mut buf = Vec::new();
        timers.print(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("total : "));
        assert!(text.contains("    factor : "));

        timers.reset_timer("total");
        assert_eq!(timers.elapsed(&["total"]), Duration::ZERO);
        assert_eq!(timers.elapsed(&["total", "factor"]), Duration::ZERO);
    }
}
