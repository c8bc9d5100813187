use std::sync::mpsc::Sender;

use crate::controllers::interactive::events::delivery::DeliveryEvent;

/// Receives results from the compute offloader's worker thread.
///
/// `deliver` runs on the worker while the offloader's submission lock is
/// held. Implementations must hand the event off quickly and must not call
/// back into the offloader.
pub trait DeliveryPort: Send + Sync {
    fn deliver(&self, event: DeliveryEvent);
}

impl DeliveryPort for Sender<DeliveryEvent> {
    fn deliver(&self, event: DeliveryEvent) {
        // a dropped receiver just means nobody is listening any more
        let _ = self.send(event);
    }
}
