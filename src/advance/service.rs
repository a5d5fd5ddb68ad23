//! Remote CRUD calls for driver advances.

use crate::{Error, api::ApiClient};

use super::{Advance, AdvanceDraft, AdvanceWire};

const ADVANCE_PATH: &str = "/advance";

/// Wraps the remote advance endpoints.
#[derive(Debug, Clone)]
pub struct AdvanceService {
    client: ApiClient,
}

impl AdvanceService {
    /// A service that talks through `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch every advance on record, normalized with defaults filled in.
    ///
    /// # Errors
    /// Returns [Error::Network] if the call fails and [Error::UnexpectedShape]
    /// if the endpoint answers with something other than an array.
    pub async fn list(&self) -> Result<Vec<Advance>, Error> {
        let wires: Vec<AdvanceWire> = self.client.get_list(ADVANCE_PATH).await?;
        tracing::debug!("fetched {} advances", wires.len());

        Ok(wires.into_iter().map(Advance::from).collect())
    }

    /// Record a new advance.
    ///
    /// # Errors
    /// Returns [Error::Validation] without touching the network if the draft
    /// fails the client-side checks.
    pub async fn create(&self, draft: &AdvanceDraft) -> Result<Advance, Error> {
        draft.validate()?;

        let wire: AdvanceWire = self
            .client
            .post_json(ADVANCE_PATH, &AdvanceWire::from(draft))
            .await?;

        Ok(Advance::from(wire))
    }

    /// Overwrite the advance with the given ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the advance no longer exists remotely.
    pub async fn update(&self, id: u64, draft: &AdvanceDraft) -> Result<Advance, Error> {
        draft.validate()?;

        let wire: AdvanceWire = self
            .client
            .put_json(&format!("{ADVANCE_PATH}/{id}"), &AdvanceWire::from(draft))
            .await?;

        Ok(Advance::from(wire))
    }

    /// Delete the advance with the given ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the advance has already been removed.
    pub async fn delete(&self, id: u64) -> Result<(), Error> {
        self.client.delete(&format!("{ADVANCE_PATH}/{id}")).await
    }
}
