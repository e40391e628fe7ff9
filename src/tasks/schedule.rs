// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Delayed, cancellable message delivery.
//!
//! A [`ScheduledTask`] sleeps on its own thread and then sends a single
//! message down a channel, unless it was cancelled first. The owner keeps the
//! handle so that it can cancel delivery when it is torn down.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
    },
    thread,
    time::Duration,
};

#[derive(Debug)]
pub(crate) struct ScheduledTask {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl ScheduledTask {
    /// Sends `message` on `tx` once `delay` has elapsed.
    ///
    /// A closed channel at delivery time is not an error; the receiver has
    /// simply gone away.
    pub(crate) fn spawn<T: Send + 'static>(id: u64, delay: Duration, tx: Sender<T>, message: T) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        thread::spawn(move || {
            thread::sleep(delay);
            if !flag.load(Ordering::Acquire) {
                let _ = tx.send(message);
            }
        });

        Self { id, cancelled }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Prevents delivery if the delay has not yet elapsed.
    ///
    /// A message already in flight may still arrive, so receivers must also
    /// check that the id is one they are waiting for.
    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn delivers_after_delay() {
        let (tx, rx) = mpsc::channel();
        let task = ScheduledTask::spawn(7, Duration::from_millis(10), tx, "reload");

        assert_eq!(task.id(), 7);
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok("reload"));
    }

    #[test]
    fn cancelled_task_is_never_delivered() {
        let (tx, rx) = mpsc::channel();
        let task = ScheduledTask::spawn(1, Duration::from_millis(100), tx, "reload");
        task.cancel();

        assert_eq!(
            rx.recv_timeout(Duration::from_millis(400)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        );
    }
}
