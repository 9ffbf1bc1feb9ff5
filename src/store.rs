//! In-memory resource store of the simulated account.

use crate::resource::{IncomingPhoneNumber, Message, Sid};
use std::collections::HashMap;

/// Messages and phone numbers the stubs serve from.
#[derive(Debug, Default)]
pub struct ResourceStore {
    /// Messages created through the create endpoint, oldest first.
    messages: Vec<Message>,
    /// Seeded incoming number list, in seeding order.
    incoming_numbers: Vec<IncomingPhoneNumber>,
    fetchable_messages: HashMap<Sid, Message>,
    fetchable_numbers: HashMap<Sid, IncomingPhoneNumber>,
}

impl ResourceStore {
    pub fn append_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Replace the whole incoming number list.
    pub fn set_incoming_numbers(&mut self, numbers: Vec<IncomingPhoneNumber>) {
        self.incoming_numbers = numbers;
    }

    pub fn incoming_numbers(&self) -> &[IncomingPhoneNumber] {
        &self.incoming_numbers
    }

    /// Register a message retrievable by its SID, replacing any previous one.
    pub fn upsert_fetchable_message(&mut self, message: Message) {
        self.fetchable_messages.insert(message.sid.clone(), message);
    }

    pub fn fetchable_message(&self, sid: &Sid) -> Option<&Message> {
        self.fetchable_messages.get(sid)
    }

    /// Register a number retrievable by its SID, replacing any previous one.
    pub fn upsert_fetchable_number(&mut self, number: IncomingPhoneNumber) {
        self.fetchable_numbers.insert(number.sid.clone(), number);
    }

    pub fn fetchable_number(&self, sid: &Sid) -> Option<&IncomingPhoneNumber> {
        self.fetchable_numbers.get(sid)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.incoming_numbers.clear();
        self.fetchable_messages.clear();
        self.fetchable_numbers.clear();
    }
}
