use crate::errors::{ClientError, ClientResult};
use factorypool_view::AllowedAction;
use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

/// A button that submits a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    CreateCampaign,
    Campaign { index: u64, action: AllowedAction },
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonId::CreateCampaign => write!(f, "create-campaign"),
            ButtonId::Campaign { index, action } => write!(f, "{} campaign #{}", action, index),
        }
    }
}

/// Buttons with a transaction in flight. At most one per button; a second
/// press while the first is pending is refused.
#[derive(Debug, Default)]
pub struct InFlight {
    pending: Mutex<HashSet<ButtonId>>,
}

impl InFlight {
    pub fn acquire(&self, button: ButtonId) -> ClientResult<InFlightGuard<'_>> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if !pending.insert(button) {
            return Err(ClientError::Busy(button.to_string()));
        }
        Ok(InFlightGuard {
            owner: self,
            button,
        })
    }

    pub fn is_pending(&self, button: ButtonId) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&button)
    }
}

/// Re-enables its button when dropped, on success and failure alike
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
    button: ButtonId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.button);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_press_is_refused_until_release() {
        let in_flight = InFlight::default();
        let button = ButtonId::Campaign {
            index: 2,
            action: AllowedAction::Buy,
        };

        let guard = in_flight.acquire(button).unwrap();
        assert!(in_flight.is_pending(button));
        assert!(matches!(in_flight.acquire(button), Err(ClientError::Busy(_))));

        // other buttons are independent
        let other = in_flight.acquire(ButtonId::CreateCampaign).unwrap();
        drop(other);

        drop(guard);
        assert!(!in_flight.is_pending(button));
        assert!(in_flight.acquire(button).is_ok());
    }
}
