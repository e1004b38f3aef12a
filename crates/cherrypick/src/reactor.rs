//! The reactor: one task that owns all game state.
//!
//! Connection handlers and reveal timers never touch rooms. They post
//! [`ReactorEvent`]s into one channel and the reactor applies them, one
//! at a time, to the [`SessionOrchestrator`]. The orchestrator's
//! [`Effects`] are then carried out here: messages are pushed into the
//! outbox of every addressed connection, timers are armed or cancelled.

use std::collections::HashMap;

use cherrypick_protocol::{ClientMessage, PlayerId, Recipient, RoomId, ServerMessage};
use cherrypick_room::{BotPolicy, Effects, SessionOrchestrator, TimerRequest};
use cherrypick_timer::TimerSet;
use tokio::sync::mpsc;

/// Sending half of a connection's outbound queue.
pub(crate) type Outbox = mpsc::UnboundedSender<ServerMessage>;

/// Everything that can change game state.
#[derive(Debug)]
pub(crate) enum ReactorEvent {
    /// A connection finished its handshake.
    Connected { player_id: PlayerId, outbox: Outbox },
    /// A decoded client action.
    Action {
        player_id: PlayerId,
        msg: ClientMessage,
    },
    /// A connection closed, cleanly or not.
    Disconnected { player_id: PlayerId },
    /// A room's reveal pause is over.
    RevealElapsed { room_id: RoomId, round: u32 },
}

pub(crate) struct Reactor<B: BotPolicy> {
    orchestrator: SessionOrchestrator<B>,
    outboxes: HashMap<PlayerId, Outbox>,
    timers: TimerSet<RoomId, ReactorEvent>,
    events: mpsc::UnboundedReceiver<ReactorEvent>,
}

impl<B: BotPolicy> Reactor<B> {
    /// `tx` must be the sending half of `events`; timers post through it.
    pub(crate) fn new(
        orchestrator: SessionOrchestrator<B>,
        tx: mpsc::UnboundedSender<ReactorEvent>,
        events: mpsc::UnboundedReceiver<ReactorEvent>,
    ) -> Self {
        Self {
            orchestrator,
            outboxes: HashMap::new(),
            timers: TimerSet::new(tx),
            events,
        }
    }

    /// Processes events until every sender is gone.
    pub(crate) async fn run(mut self) {
        tracing::debug!("reactor running");
        while let Some(event) = self.events.recv().await {
            self.apply(event);
        }
        tracing::debug!("reactor stopped");
    }

    fn apply(&mut self, event: ReactorEvent) {
        let effects = match event {
            ReactorEvent::Connected { player_id, outbox } => {
                if outbox.send(ServerMessage::Welcome { player_id }).is_err() {
                    return;
                }
                self.outboxes.insert(player_id, outbox);
                tracing::debug!(%player_id, online = self.outboxes.len(), "player online");
                return;
            }
            ReactorEvent::Action { player_id, msg } => self.orchestrator.handle(player_id, msg),
            ReactorEvent::Disconnected { player_id } => {
                self.outboxes.remove(&player_id);
                tracing::debug!(%player_id, online = self.outboxes.len(), "player offline");
                self.orchestrator.disconnect(player_id)
            }
            ReactorEvent::RevealElapsed { room_id, round } => {
                self.timers.fired(&room_id);
                self.orchestrator.advance(&room_id, round)
            }
        };
        self.execute(effects);
    }

    fn execute(&mut self, effects: Effects) {
        if effects.is_empty() {
            return;
        }
        for (recipient, msg) in effects.messages {
            match recipient {
                Recipient::Player(player_id) => self.deliver(player_id, msg),
                Recipient::Room(room_id) => {
                    for player_id in self.orchestrator.registry().members(&room_id) {
                        self.deliver(player_id, msg.clone());
                    }
                }
            }
        }

        for request in effects.timers {
            match request {
                TimerRequest::Arm {
                    room_id,
                    round,
                    delay,
                } => {
                    let event = ReactorEvent::RevealElapsed {
                        room_id: room_id.clone(),
                        round,
                    };
                    self.timers.schedule(room_id, delay, event);
                }
                TimerRequest::Cancel { room_id } => {
                    self.timers.cancel(&room_id);
                }
            }
        }
    }

    fn deliver(&self, player_id: PlayerId, msg: ServerMessage) {
        match self.outboxes.get(&player_id) {
            Some(outbox) => {
                if outbox.send(msg).is_err() {
                    tracing::debug!(%player_id, "outbox closed, message dropped");
                }
            }
            None => tracing::debug!(%player_id, "no outbox, message dropped"),
        }
    }
}
