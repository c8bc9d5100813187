use crate::controllers::interactive::data::field_delivery::{ComputeFailure, FieldDelivery};

#[derive(Debug)]
pub enum DeliveryEvent {
    Field(FieldDelivery),
    Failure(ComputeFailure),
}

impl DeliveryEvent {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::Field(delivery) => delivery.generation,
            Self::Failure(failure) => failure.generation,
        }
    }
}
