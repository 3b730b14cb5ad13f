//! Renderer that publishes snapshots to the spectator broadcast channel.

use crate::sim::{MatchSnapshot, Renderer, SnakeSnapshot, Vector2};
use tokio::sync::broadcast;

pub struct SpectatorRenderer {
    sender: broadcast::Sender<String>,
    last_sent: Option<(Vec<SnakeSnapshot>, Vector2)>,
}

impl SpectatorRenderer {
    pub fn new(sender: broadcast::Sender<String>) -> Self {
        Self {
            sender,
            last_sent: None,
        }
    }
}

impl Renderer for SpectatorRenderer {
    type Error = serde_json::Error;

    /// Publish the snapshot unless only the clock moved since the last one.
    fn draw(&mut self, snapshot: &MatchSnapshot) -> Result<(), serde_json::Error> {
        let unchanged = self
            .last_sent
            .as_ref()
            .is_some_and(|(snakes, food)| *snakes == snapshot.snakes && *food == snapshot.food);
        if unchanged {
            return Ok(());
        }

        let json = serde_json::to_string(snapshot)?;
        // No subscribers is fine
        let _ = self.sender.send(json);
        self.last_sent = Some((snapshot.snakes.clone(), snapshot.food));
        Ok(())
    }
}
