use std::{thread::sleep, time::{Duration, Instant}};

/// Keeps the game loop at a fixed number of ticks per second.
pub struct Clock {
    last_tick: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self {
        Clock { last_tick: None }
    }

    /// Block until a full frame at `rate` ticks per second has passed since
    /// the previous call. Returns the time elapsed between the two ticks.
    pub fn tick(&mut self, rate: u32) -> Duration {
        let frame = Duration::from_secs(1) / rate.max(1);

        let elapsed = match self.last_tick {
            Some(last) => {
                let spent = last.elapsed();
                if spent < frame {
                    sleep(frame - spent);
                }
                last.elapsed()
            }
            None => Duration::from_secs(0),
        };

        self.last_tick = Some(Instant::now());
        elapsed
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new()
    }
}
