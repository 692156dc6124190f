use crate::error::FormError;
use crate::form::FormState;
use crate::ids::IdGenerator;
use crate::model::Record;
use crate::store::RecordStore;
use crate::submit::{Pending, Submitter};

struct InFlight {
    record: Record,
    pending: Pending,
}

/// Form, record list and the one submission that may be in flight.
///
/// The local list is authoritative: a record is appended once its submission settles, whether
/// the endpoint accepted it or not. Failures only end up in the log.
pub struct Tracker {
    pub form: FormState,
    store: RecordStore,
    ids: IdGenerator,
    submitter: Box<dyn Submitter>,
    in_flight: Option<InFlight>,
}

impl Tracker {
    pub fn new(submitter: Box<dyn Submitter>) -> Self {
        Self {
            form: FormState::default(),
            store: RecordStore::default(),
            ids: IdGenerator::new(),
            submitter,
            in_flight: None,
        }
    }

    pub fn records(&self) -> &RecordStore {
        &self.store
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Validates the form and hands the new record to the submitter.
    ///
    /// Nothing changes when the form is incomplete or another submission is still running.
    /// The record reaches the list on the [`Self::poll`] that sees the submission settle.
    pub fn submit(&mut self) -> Result<(), FormError> {
        if self.in_flight.is_some() {
            return Err(FormError::Busy);
        }
        let (part, description, gender) = self.form.validate()?;
        let record = Record {
            id: self.ids.next(),
            part,
            description,
            gender,
        };
        log::debug!("submitting record {} ({part})", record.id);
        let pending = self.submitter.submit(&record);
        self.in_flight = Some(InFlight { record, pending });
        // Collaborators that answer synchronously settle right away.
        self.poll();
        Ok(())
    }

    /// Finishes the in-flight submission if it has settled. Returns `true` when it did.
    pub fn poll(&mut self) -> bool {
        let Some(in_flight) = &self.in_flight else {
            return false;
        };
        let Some(result) = in_flight.pending.try_settle() else {
            return false;
        };
        let Some(InFlight { record, .. }) = self.in_flight.take() else {
            return false;
        };

        match result {
            Ok(()) => log::info!("record {} submitted", record.id),
            Err(err) => log::error!("submission of record {} failed: {err}", record.id),
        }
        self.store.append(record);
        self.form.reset();
        true
    }
}
