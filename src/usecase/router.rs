//! Event router: the room coordination engine.
//!
//! A stateless dispatcher keyed by event kind. State lives in the injected
//! collaborators: the [`ConnectionRegistry`] for membership, the
//! [`RoomStore`] for the durable room record, the [`TimerBoard`] for timer
//! state. For each inbound event the router identifies the target room,
//! decides the audience, performs any persistence side effect, and fans
//! the derived event out.
//!
//! Persistence is fire-and-forget relative to the broadcast: the store
//! write is spawned *after* fan-out and a failure is logged, never
//! propagated. The real-time channel is authoritative for live state;
//! storage is a lagging best-effort snapshot.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{ClientEvent, ConnectionId, MessagePusher, RoomStore, ServerEvent, Timestamp};
use crate::infrastructure::{registry::ConnectionRegistry, timer::TimerBoard};

/// Who receives a broadcast within the target room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Audience {
    IncludingSender,
    ExcludingSender,
}

/// Routes inbound events to side effects and outbound broadcasts.
pub struct EventRouter {
    store: Arc<dyn RoomStore>,
    registry: Arc<ConnectionRegistry>,
    pusher: Arc<dyn MessagePusher>,
    timers: Arc<TimerBoard>,
    clock: Arc<dyn Clock>,
}

impl EventRouter {
    pub fn new(
        store: Arc<dyn RoomStore>,
        registry: Arc<ConnectionRegistry>,
        pusher: Arc<dyn MessagePusher>,
        timers: Arc<TimerBoard>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            registry,
            pusher,
            timers,
            clock,
        }
    }

    /// Handle one inbound event from `sender`.
    ///
    /// Per-sender FIFO ordering comes from the caller: each connection's
    /// receive loop awaits this method for every event in turn. Events from
    /// different senders may be processed concurrently.
    pub async fn dispatch(&self, sender: ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::JoinRoom { room_id, user } => {
                self.registry.join(sender, &room_id, &user).await;
                tracing::info!("'{}' joined room '{}'", user, room_id);
                self.broadcast(
                    &room_id,
                    sender,
                    Audience::ExcludingSender,
                    &ServerEvent::UserJoined { user },
                )
                .await;
            }
            ClientEvent::LeaveRoom { room_id, user } => {
                self.registry.leave(sender, &room_id).await;
                tracing::info!("'{}' left room '{}'", user, room_id);
                self.broadcast(
                    &room_id,
                    sender,
                    Audience::ExcludingSender,
                    &ServerEvent::UserLeft { user },
                )
                .await;
            }
            ClientEvent::ChatMessage {
                room_id,
                user,
                message,
                timestamp,
            } => {
                tracing::debug!("'{}' in '{}': {}", user, room_id, message);
                let outbound = ServerEvent::ChatMessage {
                    room_id: room_id.clone(),
                    user,
                    message,
                    timestamp,
                };
                self.broadcast(&room_id, sender, Audience::IncludingSender, &outbound)
                    .await;
                self.spawn_touch_activity(room_id);
            }
            ClientEvent::NoteUpdate { room_id, notes } => {
                tracing::debug!("Notes updated in room '{}'", room_id);
                self.broadcast(
                    &room_id,
                    sender,
                    Audience::ExcludingSender,
                    &ServerEvent::NoteUpdate {
                        notes: notes.clone(),
                    },
                )
                .await;
                self.spawn_update_notes(room_id, notes);
            }
            ClientEvent::TimerStart { room_id, duration } => {
                self.timers.on_start(&room_id, duration).await;
                tracing::info!("Timer started in room '{}' for {}s", room_id, duration);
                self.broadcast(
                    &room_id,
                    sender,
                    Audience::ExcludingSender,
                    &ServerEvent::TimerStart { duration },
                )
                .await;
            }
            ClientEvent::TimerStop { room_id } => {
                self.timers.on_stop(&room_id).await;
                tracing::info!("Timer stopped in room '{}'", room_id);
                self.broadcast(
                    &room_id,
                    sender,
                    Audience::ExcludingSender,
                    &ServerEvent::TimerStop {},
                )
                .await;
            }
            ClientEvent::TimerEnded { room_id } => {
                self.timers.on_ended(&room_id).await;
                tracing::info!("Timer ended in room '{}'", room_id);
                self.broadcast(
                    &room_id,
                    sender,
                    Audience::IncludingSender,
                    &ServerEvent::TimerEnded {},
                )
                .await;
            }
        }
    }

    /// Tear down a connection: unregister its channel, remove it from every
    /// room it joined, and announce `user-left` to each of those rooms.
    ///
    /// Runs synchronously with connection teardown so presence lists never
    /// accumulate ghosts. A connection that never joined a room tears down
    /// silently.
    pub async fn handle_disconnect(&self, connection_id: ConnectionId) {
        self.pusher.unregister_connection(connection_id).await;
        let joined = self.registry.drain_connection(connection_id).await;
        for (room_id, user) in joined {
            tracing::info!("'{}' disconnected from room '{}'", user, room_id);
            // The connection is already drained from the registry, so the
            // member list no longer contains it.
            self.broadcast(
                &room_id,
                connection_id,
                Audience::ExcludingSender,
                &ServerEvent::UserLeft { user },
            )
            .await;
        }
    }

    /// Fan `event` out to the room's current members.
    ///
    /// The sender receives the event only when the audience includes it
    /// *and* it is a member of the room.
    async fn broadcast(
        &self,
        room_id: &str,
        sender: ConnectionId,
        audience: Audience,
        event: &ServerEvent,
    ) {
        let mut targets = self.registry.members(room_id).await;
        if audience == Audience::ExcludingSender {
            targets.retain(|id| *id != sender);
        }
        if targets.is_empty() {
            return;
        }

        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize outbound event: {}", e);
                return;
            }
        };
        self.pusher.broadcast(&targets, &json).await;
    }

    /// Bump the room's `last_activity` off the hot path.
    fn spawn_touch_activity(&self, room_id: String) {
        let store = Arc::clone(&self.store);
        let now = Timestamp::new(self.clock.now_millis());
        tokio::spawn(async move {
            if let Err(e) = store.touch_activity(&room_id, now).await {
                tracing::warn!("Failed to update activity for room '{}': {}", room_id, e);
            }
        });
    }

    /// Persist the latest notes off the hot path. Last writer wins.
    fn spawn_update_notes(&self, room_id: String, notes: String) {
        let store = Arc::clone(&self.store);
        let now = Timestamp::new(self.clock.now_millis());
        tokio::spawn(async move {
            if let Err(e) = store.update_notes(&room_id, notes, now).await {
                tracing::warn!("Failed to save notes for room '{}': {}", room_id, e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::FixedClock;
    use crate::domain::{MockRoomStore, StoreError};
    use crate::infrastructure::message_pusher::WebSocketMessagePusher;
    use tokio::sync::mpsc;

    struct Harness {
        router: EventRouter,
        pusher: Arc<WebSocketMessagePusher>,
    }

    fn harness(store: MockRoomStore) -> Harness {
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let router = EventRouter::new(
            Arc::new(store),
            Arc::new(ConnectionRegistry::new()),
            pusher.clone(),
            Arc::new(TimerBoard::new()),
            Arc::new(FixedClock::new(1_000)),
        );
        Harness { router, pusher }
    }

    async fn connect(h: &Harness) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        h.pusher.register_connection(id, tx).await;
        (id, rx)
    }

    /// Let fire-and-forget persistence tasks run on the current-thread
    /// test runtime.
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_store_failure_does_not_suppress_chat_broadcast() {
        // given: a store whose activity writes always fail
        let mut store = MockRoomStore::new();
        store
            .expect_touch_activity()
            .returning(|_, _| Err(StoreError::Unavailable("connection refused".to_string())));
        let h = harness(store);

        let (a, mut rx_a) = connect(&h).await;
        let (b, mut rx_b) = connect(&h).await;
        h.router
            .dispatch(
                a,
                ClientEvent::JoinRoom {
                    room_id: "r1".to_string(),
                    user: "alice".to_string(),
                },
            )
            .await;
        h.router
            .dispatch(
                b,
                ClientEvent::JoinRoom {
                    room_id: "r1".to_string(),
                    user: "bob".to_string(),
                },
            )
            .await;
        let _ = rx_a.try_recv(); // alice's user-joined for bob

        // when: alice sends a chat message
        h.router
            .dispatch(
                a,
                ClientEvent::ChatMessage {
                    room_id: "r1".to_string(),
                    user: "alice".to_string(),
                    message: "hi".to_string(),
                    timestamp: 42,
                },
            )
            .await;
        settle().await;

        // then: both members (sender included) still received the message
        let expected = serde_json::to_string(&ServerEvent::ChatMessage {
            room_id: "r1".to_string(),
            user: "alice".to_string(),
            message: "hi".to_string(),
            timestamp: 42,
        })
        .unwrap();
        assert_eq!(rx_a.try_recv(), Ok(expected.clone()));
        assert_eq!(rx_b.try_recv(), Ok(expected));
    }

    #[tokio::test]
    async fn test_note_update_persistence_failure_is_contained() {
        // given: a store whose notes writes always fail
        let mut store = MockRoomStore::new();
        store
            .expect_update_notes()
            .returning(|_, _, _| Err(StoreError::RoomNotFound("r1".to_string())));
        let h = harness(store);

        let (a, mut rx_a) = connect(&h).await;
        let (b, mut rx_b) = connect(&h).await;
        for (id, user) in [(a, "alice"), (b, "bob")] {
            h.router
                .dispatch(
                    id,
                    ClientEvent::JoinRoom {
                        room_id: "r1".to_string(),
                        user: user.to_string(),
                    },
                )
                .await;
        }
        let _ = rx_a.try_recv();

        // when: alice updates the notes
        h.router
            .dispatch(
                a,
                ClientEvent::NoteUpdate {
                    room_id: "r1".to_string(),
                    notes: "hello".to_string(),
                },
            )
            .await;
        settle().await;

        // then: bob received the update, alice did not, nothing crashed
        let expected = serde_json::to_string(&ServerEvent::NoteUpdate {
            notes: "hello".to_string(),
        })
        .unwrap();
        assert_eq!(rx_b.try_recv(), Ok(expected));
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_chat_from_non_member_does_not_echo_back() {
        // given: alice never joined the room she targets
        let mut store = MockRoomStore::new();
        store.expect_touch_activity().returning(|_, _| Ok(()));
        let h = harness(store);

        let (a, mut rx_a) = connect(&h).await;
        let (b, mut rx_b) = connect(&h).await;
        h.router
            .dispatch(
                b,
                ClientEvent::JoinRoom {
                    room_id: "r1".to_string(),
                    user: "bob".to_string(),
                },
            )
            .await;

        // when: the non-member sends a chat message into the room
        h.router
            .dispatch(
                a,
                ClientEvent::ChatMessage {
                    room_id: "r1".to_string(),
                    user: "alice".to_string(),
                    message: "hi".to_string(),
                    timestamp: 1,
                },
            )
            .await;
        settle().await;

        // then: members receive it, the non-member sender gets no echo
        assert!(rx_b.try_recv().is_ok());
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_to_empty_room_skips_serialization_work() {
        // given: no members anywhere
        let store = MockRoomStore::new(); // no expectations: store must stay untouched
        let h = harness(store);
        let (a, mut rx_a) = connect(&h).await;

        // when: a timer event targets an empty room
        h.router
            .dispatch(
                a,
                ClientEvent::TimerStart {
                    room_id: "empty".to_string(),
                    duration: 60,
                },
            )
            .await;

        // then: nothing is delivered, no store interaction happened
        assert!(rx_a.try_recv().is_err());
    }
}
