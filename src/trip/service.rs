//! Remote CRUD calls for delivery trips.

use crate::{Error, api::ApiClient};

use super::{Trip, TripDraft, TripWire};

const TRIPS_PATH: &str = "/tripdata";
const IMAGE_UPLOAD_PATH: &str = "/images/upload";

/// Wraps the remote trip endpoints.
#[derive(Debug, Clone)]
pub struct TripService {
    client: ApiClient,
}

impl TripService {
    /// A service that talks through `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch every trip on record, normalized with defaults filled in.
    ///
    /// # Errors
    /// Returns [Error::Network] if the call fails and [Error::UnexpectedShape]
    /// if the endpoint answers with something other than an array.
    pub async fn list(&self) -> Result<Vec<Trip>, Error> {
        let wires: Vec<TripWire> = self.client.get_list(TRIPS_PATH).await?;
        tracing::debug!("fetched {} trips", wires.len());

        Ok(wires.into_iter().map(Trip::from).collect())
    }

    /// Record a new trip.
    ///
    /// # Errors
    /// Returns [Error::Validation] without touching the network if the draft
    /// fails the client-side checks, otherwise the usual remote call errors.
    pub async fn create(&self, draft: &TripDraft) -> Result<Trip, Error> {
        draft.validate()?;

        let wire: TripWire = self
            .client
            .post_json(TRIPS_PATH, &TripWire::from(draft))
            .await?;

        Ok(Trip::from(wire))
    }

    /// Overwrite the trip with the given ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the trip no longer exists remotely.
    pub async fn update(&self, id: u64, draft: &TripDraft) -> Result<Trip, Error> {
        draft.validate()?;

        let wire: TripWire = self
            .client
            .put_json(&format!("{TRIPS_PATH}/{id}"), &TripWire::from(draft))
            .await?;

        Ok(Trip::from(wire))
    }

    /// Delete the trip with the given ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the trip has already been removed.
    pub async fn delete(&self, id: u64) -> Result<(), Error> {
        self.client.delete(&format!("{TRIPS_PATH}/{id}")).await
    }

    /// Attach a weighbridge receipt image to a trip.
    pub async fn upload_receipt(
        &self,
        trip_id: u64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), Error> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_owned());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("tripId", trip_id.to_string());

        self.client.post_multipart(IMAGE_UPLOAD_PATH, form).await
    }
}
