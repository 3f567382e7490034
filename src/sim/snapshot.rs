//! Read-only session view for renderers

use serde::{Deserialize, Serialize};

use super::state::Session;

/// Render data for one drop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropView {
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

/// Everything a renderer needs from a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub score: u32,
    pub win_threshold: u32,
    pub is_over: bool,
    pub character_position: f32,
    pub drops: Vec<DropView>,
}

impl SessionView {
    /// One slot per point needed to win, filled up to the current score
    pub fn counter_slots(&self) -> Vec<bool> {
        (0..self.win_threshold).map(|i| i < self.score).collect()
    }
}

impl Session {
    pub fn view(&self) -> SessionView {
        SessionView {
            score: self.score,
            win_threshold: self.tuning.win_threshold,
            is_over: self.is_over,
            character_position: self.character_position,
            drops: self
                .drops
                .iter()
                .map(|d| DropView {
                    id: d.id,
                    x: d.x,
                    y: d.y,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::spawn_drop_at;

    #[test]
    fn test_view_mirrors_session() {
        let mut session = Session::default();
        spawn_drop_at(&mut session, 12.0, 1.0);
        session.score = 2;

        let view = session.view();
        assert_eq!(view.score, 2);
        assert_eq!(view.character_position, 50.0);
        assert_eq!(view.drops.len(), 1);
        assert_eq!(view.drops[0].x, 12.0);
        assert_eq!(view.drops[0].y, -5.0);
    }

    #[test]
    fn test_counter_slots() {
        let mut session = Session::default();
        session.score = 2;
        assert_eq!(
            session.view().counter_slots(),
            vec![true, true, false, false, false]
        );
    }

    #[test]
    fn test_view_serializes() {
        let json = serde_json::to_string(&Session::default().view()).unwrap();
        assert!(json.contains("\"is_over\":false"));
        assert!(json.contains("\"drops\":[]"));
    }
}
