//! `CalendarSource` backed by the Google Calendar API.

use std::path::Path;

use anyhow::{Context, Result};
use google_calendar::Client;
use google_calendar::types::{MinAccessRole, OrderBy};
use weekplan_core::credentials::CredentialStore;
use weekplan_core::source::{CalendarInfo, CalendarSource, DayWindow};
use weekplan_core::{Event, PlannerError, PlannerResult};

use crate::app_config::AppCredentials;
use crate::convert::{calendar_from_google, event_from_google};
use crate::session::Session;

pub struct GoogleCalendarSource {
    client: Client,
}

impl GoogleCalendarSource {
    /// Sign in as `account`, using stored credentials when possible.
    pub async fn connect<S: CredentialStore>(
        credentials_path: &Path,
        account: &str,
        store: &S,
    ) -> Result<Self> {
        let app = AppCredentials::load(credentials_path)?;
        let session = Session::obtain(&app, account, store).await?;

        Ok(GoogleCalendarSource {
            client: session.client(&app),
        })
    }

    async fn fetch_calendars(&self) -> Result<Vec<CalendarInfo>> {
        let entries = self
            .client
            .calendar_list()
            .list_all(MinAccessRole::Owner, false, false)
            .await
            .context("Failed to fetch calendars")?
            .body;

        Ok(entries.into_iter().filter_map(calendar_from_google).collect())
    }

    async fn fetch_events(&self, calendar: &CalendarInfo, window: DayWindow) -> Result<Vec<Event>> {
        let time_min = window.start.to_rfc3339();
        let time_max = window.end.to_rfc3339();

        tracing::debug!(calendar = %calendar.name, date = %window.date, "fetching events");

        let events = self
            .client
            .events()
            .list_all(
                &calendar.id,
                "",                 // i_cal_uid
                0,                  // max_attendees
                OrderBy::StartTime, // order_by
                &[],                // private_extended_property
                "",                 // q (search query)
                &[],                // shared_extended_property
                false,              // show_deleted
                false,              // show_hidden_invitations
                true,               // single_events: expand recurring events
                &time_max,          // time_max
                &time_min,          // time_min
                "",                 // time_zone
                "",                 // updated_min
            )
            .await
            .with_context(|| format!("Failed to fetch events of calendar '{}'", calendar.name))?
            .body;

        Ok(events.into_iter().filter_map(event_from_google).collect())
    }
}

fn source_error(err: anyhow::Error) -> PlannerError {
    PlannerError::Source(format!("{:#}", err))
}

impl CalendarSource for GoogleCalendarSource {
    async fn calendars(&self) -> PlannerResult<Vec<CalendarInfo>> {
        self.fetch_calendars().await.map_err(source_error)
    }

    async fn events(&self, calendar: &CalendarInfo, window: DayWindow) -> PlannerResult<Vec<Event>> {
        self.fetch_events(calendar, window).await.map_err(source_error)
    }
}
