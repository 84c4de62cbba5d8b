//! End-to-end pipeline scenarios over the loopback wiring.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use dispatch_e2e_tests::{
    init_tracing, Move, MoveConfirmed, MoveConfirmedReceiver, MoveHandler, Recorded, Unknown,
};
use network::{Network, Outbound};
use parking_lot::Mutex;
use processors::{Composition, ProcessError};
use routing::{ActionIndexer, RoutingError};
use types::{
    Action, ActionHandler, Command, MessageType, Processable, TypeDescriptor,
};

fn recorded<T>() -> Recorded<T> {
    Arc::new(Mutex::new(Vec::new()))
}

fn game_types(
    handled: &Recorded<Move>,
    received: &Recorded<MoveConfirmed>,
) -> Vec<TypeDescriptor> {
    let handled = Arc::clone(handled);
    let received = Arc::clone(received);
    vec![
        TypeDescriptor::plain::<Move>(),
        TypeDescriptor::plain::<MoveConfirmed>(),
        TypeDescriptor::action_handler_with(move || MoveHandler {
            handled: Arc::clone(&handled),
        }),
        TypeDescriptor::command_receiver_with(move || MoveConfirmedReceiver {
            received: Arc::clone(&received),
        }),
    ]
}

#[tokio::test]
async fn move_round_trips_through_both_processors() {
    init_tracing();
    let handled = recorded();
    let received = recorded();

    let mut pipeline = Composition::default()
        .add_types(game_types(&handled, &received))
        .build_loopback()
        .unwrap();

    pipeline
        .outgoing_actions
        .push(Arc::new(Move { x: 2, y: 5 }))
        .unwrap();

    // Server: action → handler → confirmation command.
    let dispatch = pipeline.server.process_next().await.unwrap().unwrap();
    assert_eq!(dispatch.message, MessageType::of::<Move>());
    assert_eq!(dispatch.target, MessageType::of::<MoveHandler>());
    assert!(dispatch.responded);
    assert_eq!(handled.lock().as_slice(), &[Move { x: 2, y: 5 }]);

    // Client: confirmation command → receiver.
    let dispatch = pipeline.client.process_next().await.unwrap().unwrap();
    assert_eq!(dispatch.message, MessageType::of::<MoveConfirmed>());
    assert!(!dispatch.responded);
    assert_eq!(received.lock().as_slice(), &[MoveConfirmed { x: 2, y: 5 }]);
}

#[tokio::test]
async fn unknown_action_reports_once_and_the_pipeline_continues() {
    init_tracing();
    let handled = recorded();
    let received = recorded();

    let mut pipeline = Composition::default()
        .add_types(game_types(&handled, &received))
        .build_loopback()
        .unwrap();

    pipeline.outgoing_actions.push(Arc::new(Unknown)).unwrap();
    pipeline
        .outgoing_actions
        .push(Arc::new(Move { x: 0, y: 0 }))
        .unwrap();

    let err = pipeline.server.process_next().await.unwrap().unwrap_err();
    assert!(matches!(
        err,
        ProcessError::Routing(RoutingError::NoHandlerForType { message })
            if message == MessageType::of::<Unknown>()
    ));

    let dispatch = pipeline.server.process_next().await.unwrap().unwrap();
    assert_eq!(dispatch.message, MessageType::of::<Move>());
    assert_eq!(handled.lock().len(), 1);

    let stats = pipeline.server.metrics().snapshot();
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.processed, 1);
}

#[tokio::test]
async fn sends_through_the_network_contract_reach_the_server() {
    init_tracing();
    let handled = recorded();
    let received = recorded();

    let mut pipeline = Composition::default()
        .add_types(game_types(&handled, &received))
        .build_loopback()
        .unwrap();

    let network = pipeline.network();
    network
        .send(Outbound::Action(Arc::new(Move { x: 1, y: 1 })))
        .unwrap();

    pipeline.server.process_next().await.unwrap().unwrap();
    assert_eq!(handled.lock().len(), 1);
}

#[tokio::test]
async fn run_loops_survive_routing_misses() {
    init_tracing();
    let handled = recorded();
    let received = recorded();

    let pipeline = Composition::default()
        .add_types(game_types(&handled, &received))
        .build_loopback()
        .unwrap();

    let actions = pipeline.outgoing_actions.clone();
    let mut server = pipeline.server;
    let mut client = pipeline.client;
    let server_task = tokio::spawn(async move { server.run().await });
    let client_task = tokio::spawn(async move { client.run().await });

    actions.push(Arc::new(Move { x: 1, y: 2 })).unwrap();
    actions.push(Arc::new(Unknown)).unwrap();
    actions.push(Arc::new(Move { x: 3, y: 4 })).unwrap();

    // Both moves handled and confirmed despite the miss in between.
    for _ in 0..100 {
        if received.lock().len() == 2 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(handled.lock().len(), 2);
    assert_eq!(
        received.lock().as_slice(),
        &[MoveConfirmed { x: 1, y: 2 }, MoveConfirmed { x: 3, y: 4 }]
    );

    // The loops stay alive until their queues close; stop them explicitly.
    server_task.abort();
    client_task.abort();
}

#[tokio::test]
async fn discovered_handlers_resolve_through_the_registry() {
    init_tracing();

    #[derive(Debug)]
    struct Fire;

    impl Processable for Fire {
        fn message_type(&self) -> MessageType {
            MessageType::of::<Fire>()
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl Action for Fire {}

    #[derive(Default)]
    struct FireHandler;

    #[async_trait]
    impl ActionHandler for FireHandler {
        type Action = Fire;

        async fn handle(&self, _action: &Fire) -> anyhow::Result<Option<Arc<dyn Command>>> {
            Ok(None)
        }
    }

    let handled = recorded();
    let received = recorded();
    let mut descriptors = game_types(&handled, &received);
    descriptors.push(TypeDescriptor::action_handler::<FireHandler>());

    let pipeline = Composition::default()
        .add_types(descriptors)
        .build_loopback()
        .unwrap();

    // Both discovered handler types are registered, each as one singleton.
    let indexer = pipeline.registry.resolve::<ActionIndexer>().unwrap();
    let discovered: Vec<MessageType> = indexer.handlers().map(|b| b.handler_type()).collect();
    assert_eq!(discovered.len(), 2);
    assert!(discovered.contains(&MessageType::of::<MoveHandler>()));
    assert!(discovered.contains(&MessageType::of::<FireHandler>()));

    for handler_type in discovered {
        let first = pipeline.registry.action_handler(handler_type).unwrap();
        let second = pipeline.registry.action_handler(handler_type).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}

#[tokio::test]
async fn descriptor_batching_does_not_change_the_pipeline() {
    init_tracing();
    let handled = recorded();
    let received = recorded();

    // Same types, fed in three batches with overlap.
    let mut first = game_types(&handled, &received);
    let second = first.split_off(2);
    let overlap = game_types(&handled, &received);

    let mut pipeline = Composition::default()
        .add_types(first)
        .add_types(second)
        .add_types(overlap)
        .build_loopback()
        .unwrap();

    pipeline
        .outgoing_actions
        .push(Arc::new(Move { x: 7, y: 7 }))
        .unwrap();
    pipeline.server.process_next().await.unwrap().unwrap();

    assert_eq!(handled.lock().len(), 1);
}
