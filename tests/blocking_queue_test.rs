use traffic_light::{BlockingQueue, CountdownLatch};

use std::collections::HashSet;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn receive_returns_newest_first() {
    let queue = BlockingQueue::new();
    queue.send(1);
    queue.send(2);
    queue.send(3);

    assert_eq!(queue.len(), 3);
    assert_eq!(queue.receive(), 3);
    assert_eq!(queue.receive(), 2);
    assert_eq!(queue.receive(), 1);
    assert!(queue.is_empty());
}

#[test]
fn receive_blocks_until_send() {
    let queue = BlockingQueue::new();
    let consumer = {
        let queue = queue.clone();
        thread::spawn(move || queue.receive())
    };

    thread::sleep(Duration::from_millis(100));
    assert!(!consumer.is_finished());

    queue.send("go");
    assert_eq!(consumer.join().unwrap(), "go");
}

#[test]
fn competing_receivers_each_get_one_value() {
    const N: usize = 16;
    let queue = BlockingQueue::new();
    let started = CountdownLatch::new(N);

    let consumers: Vec<_> = (0..N)
        .map(|_| {
            let queue = queue.clone();
            let started = started.clone();
            thread::spawn(move || {
                started.countdown();
                queue.receive()
            })
        })
        .collect();

    started.wait();
    for i in 0..N {
        queue.send(i);
    }

    let received: Vec<usize> = consumers.into_iter().map(|c| c.join().unwrap()).collect();
    let unique: HashSet<usize> = received.iter().copied().collect();
    assert_eq!(received.len(), N);
    assert_eq!(unique, (0..N).collect::<HashSet<_>>());
    assert!(queue.is_empty());
}

#[test]
fn receive_timeout_gives_up_on_empty_queue() {
    let queue: BlockingQueue<u32> = BlockingQueue::new();
    let start = Instant::now();
    assert_eq!(queue.receive_timeout(Duration::from_millis(50)), None);
    assert!(start.elapsed() >= Duration::from_millis(50));

    queue.send(7);
    assert_eq!(queue.receive_timeout(Duration::from_millis(50)), Some(7));
}

#[test]
fn try_receive_does_not_block() {
    let queue = BlockingQueue::new();
    assert_eq!(queue.try_receive(), None);
    queue.send('a');
    queue.send('b');
    assert_eq!(queue.try_receive(), Some('b'));
    assert_eq!(queue.len(), 1);
}
