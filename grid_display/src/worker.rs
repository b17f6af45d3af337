// worker.rs - Background owner of the simulation engine
//
// The UI thread never touches the engine. It posts requests to a single
// blocking task on the tokio runtime, which applies them one at a time and
// sends back an owned snapshot after each.

use flat_life::{Board, Cycle, Life};
use log::{debug, warn};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Something the UI wants done to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Advance(usize),
    Reseed {
        rows: usize,
        columns: usize,
        threshold: f64,
    },
    Resize {
        rows: usize,
        columns: usize,
    },
    Load(Board),
}

/// Everything the UI needs to draw one generation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub generation: usize,
    pub board: Board,
    pub neighbor_counts: Vec<usize>,
    pub cycle: Option<Cycle>,
}

impl Snapshot {
    fn of(life: &Life) -> Self {
        Self {
            generation: life.generation(),
            board: life.current_board().clone(),
            neighbor_counts: life.neighbor_counts(),
            cycle: life.cycle(),
        }
    }
}

#[derive(Debug)]
pub enum Reply {
    /// The engine moved to another generation of the same lineage.
    Snapshot(Snapshot),
    /// A reseed, resize or load succeeded; the snapshot is generation 0 of
    /// the new lineage.
    Restarted(Snapshot),
    /// A reseed, resize or load failed and the engine is unchanged.
    Rejected(String),
}

pub struct Worker {
    requests: UnboundedSender<Request>,
    replies: UnboundedReceiver<Reply>,
    // Dropped last: the request channel has to close first so the worker
    // loop ends before the runtime waits on it.
    _runtime: Runtime,
}

impl Worker {
    /// Moves `life` onto a blocking task of `runtime`. `repaint` is called
    /// whenever a reply is ready.
    pub fn spawn(
        runtime: Runtime,
        life: Life,
        repaint: impl Fn() + Send + 'static,
    ) -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        runtime.spawn_blocking(move || run(life, request_rx, reply_tx, repaint));
        Self {
            requests: request_tx,
            replies: reply_rx,
            _runtime: runtime,
        }
    }

    pub fn send(&self, request: Request) {
        if self.requests.send(request).is_err() {
            warn!("simulation worker has stopped; request dropped");
        }
    }

    /// Next reply, if one has arrived.
    pub fn try_recv(&mut self) -> Option<Reply> {
        self.replies.try_recv().ok()
    }
}

fn run(
    mut life: Life,
    mut requests: UnboundedReceiver<Request>,
    replies: UnboundedSender<Reply>,
    repaint: impl Fn(),
) {
    if replies.send(Reply::Snapshot(Snapshot::of(&life))).is_err() {
        return;
    }
    repaint();

    while let Some(first) = requests.blocking_recv() {
        let mut batch = vec![first];
        while let Ok(request) = requests.try_recv() {
            batch.push(request);
        }

        for request in coalesce(batch) {
            let restart = !matches!(request, Request::Advance(_));
            let reply = match apply(&mut life, request) {
                Ok(()) if restart => Reply::Restarted(Snapshot::of(&life)),
                Ok(()) => Reply::Snapshot(Snapshot::of(&life)),
                Err(e) => {
                    warn!("request rejected: {e}");
                    Reply::Rejected(e.to_string())
                }
            };
            if replies.send(reply).is_err() {
                return;
            }
        }
        repaint();
    }
    debug!("simulation worker exiting");
}

fn apply(life: &mut Life, request: Request) -> flat_life::Result<()> {
    match request {
        Request::Advance(generation) => {
            life.advance_to(generation);
        }
        Request::Reseed {
            rows,
            columns,
            threshold,
        } => {
            life.reseed(rows, columns, threshold)?;
        }
        Request::Resize { rows, columns } => {
            life.resize(rows, columns)?;
        }
        Request::Load(board) => {
            life.load(board);
        }
    }
    Ok(())
}

/// Drops every `Advance` that is immediately superseded by another one.
fn coalesce(batch: Vec<Request>) -> Vec<Request> {
    let mut out: Vec<Request> = Vec::with_capacity(batch.len());
    for request in batch {
        if let (Some(Request::Advance(_)), Request::Advance(_)) = (out.last(), &request) {
            out.pop();
        }
        out.push(request);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use flat_life::Dimensions;
    use std::time::{Duration, Instant};

    fn wait_for(worker: &mut Worker, mut done: impl FnMut(&Reply) -> bool) -> Reply {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(reply) = worker.try_recv() {
                if done(&reply) {
                    return reply;
                }
            } else {
                std::thread::sleep(Duration::from_millis(5));
            }
        }
        panic!("no matching reply from worker");
    }

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .build()
            .unwrap()
    }

    #[test]
    fn test_coalesce_advances() {
        let batch = vec![
            Request::Advance(1),
            Request::Advance(2),
            Request::Resize { rows: 3, columns: 3 },
            Request::Advance(4),
            Request::Advance(5),
            Request::Advance(6),
        ];
        assert_eq!(
            coalesce(batch),
            vec![
                Request::Advance(2),
                Request::Resize { rows: 3, columns: 3 },
                Request::Advance(6),
            ]
        );
    }

    #[test]
    fn test_worker_round_trip() {
        let start = Board::parse(".O.\n..O\nOOO").unwrap();
        let mut worker = Worker::spawn(runtime(), Life::with_board(start.clone()), || ());

        let Reply::Snapshot(first) = wait_for(&mut worker, |_| true) else {
            panic!("expected a snapshot");
        };
        assert_eq!(first.generation, 0);
        assert_eq!(first.board, start);

        worker.send(Request::Advance(3));
        let reply = wait_for(&mut worker, |r| {
            matches!(r, Reply::Snapshot(s) if s.generation == 3)
        });
        let Reply::Snapshot(third) = reply else {
            unreachable!()
        };
        assert_eq!(third.board, Board::parse("...\n.OO\n.OO").unwrap());
        assert_eq!(third.neighbor_counts[4], 3);
    }

    #[test]
    fn test_worker_rejects_bad_reseed() {
        let life = Life::new(Dimensions::new(4, 4).unwrap());
        let mut worker = Worker::spawn(runtime(), life, || ());
        worker.send(Request::Reseed {
            rows: 0,
            columns: 4,
            threshold: 0.5,
        });
        let reply = wait_for(&mut worker, |r| matches!(r, Reply::Rejected(_)));
        let Reply::Rejected(message) = reply else {
            unreachable!()
        };
        assert!(message.contains("0x4"));
    }

    #[test]
    fn test_worker_marks_restarts() {
        let life = Life::new(Dimensions::new(4, 4).unwrap());
        let mut worker = Worker::spawn(runtime(), life, || ());
        worker.send(Request::Advance(2));
        worker.send(Request::Resize { rows: 2, columns: 5 });
        let reply = wait_for(&mut worker, |r| matches!(r, Reply::Restarted(_)));
        let Reply::Restarted(snapshot) = reply else {
            unreachable!()
        };
        assert_eq!(snapshot.generation, 0);
        assert_eq!(snapshot.board.dims(), Dimensions::new(2, 5).unwrap());
    }
}
