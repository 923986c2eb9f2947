//! Concurrent registration and dispatch against shared registries.

use std::{sync::Arc, thread};
use switchyard::{Key, Router, Value, testing::capture_value};

#[test]
fn test_concurrent_registration_then_dispatch() {
    let router = Arc::new(Router::new());

    let writers: Vec<_> = (0..100)
        .map(|i| {
            let router = router.clone();
            thread::spawn(move || {
                router
                    .register_value(&format!("item/{i}"), move |_, _| Ok(Value::new(i)))
                    .unwrap()
            })
        })
        .collect();
    for writer in writers {
        assert!(!writer.join().unwrap(), "keys are distinct, nothing is replaced");
    }

    let readers: Vec<_> = (0..100)
        .map(|i| {
            let router = router.clone();
            thread::spawn(move || router.get::<i32>(&format!("item/{i}"), None))
        })
        .collect();
    for (i, reader) in readers.into_iter().enumerate() {
        assert_eq!(reader.join().unwrap(), Ok(i as i32));
    }
}

#[test]
fn test_dispatch_during_registration() {
    let router = Arc::new(Router::new());
    router.register_action("stable", |_, _| Ok(())).unwrap();

    let writer = {
        let router = router.clone();
        thread::spawn(move || {
            for i in 0..200 {
                router
                    .register_action(&Key::from(format!("hot/{i}")), |_, _| Ok(()))
                    .unwrap();
            }
        })
    };
    let reader = {
        let router = router.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                assert_eq!(router.perform("stable", None), Ok(()));
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
    for i in 0..200 {
        assert_eq!(router.perform(&format!("hot/{i}"), None), Ok(()));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_async_dispatch() {
    let router = Arc::new(Router::new());
    for i in 0..100_u64 {
        router
            .register_async_value(&format!("calc/{i}"), move |_, _, callback| {
                tokio::spawn(async move { callback(Ok(Value::new(i * 2))) });
            })
            .unwrap();
    }

    let pending: Vec<_> = (0..100_u64)
        .map(|i| {
            let (callback, captured) = capture_value::<u64>();
            router.get_with::<u64>(&format!("calc/{i}"), None, callback);
            captured
        })
        .collect();

    let results = futures::future::join_all(pending).await;
    for (i, result) in results.into_iter().enumerate() {
        assert_eq!(result, Some(Ok(i as u64 * 2)));
    }
}
