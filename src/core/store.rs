use crate::core::{
    validate, AddError, FetchError, LinkMetadata, LinkRecord, MetadataFetcher, Storage,
    StorageError, Theme,
};
use crate::utils::current_millis;
use tracing::{debug, info, warn};

pub const LINKS_KEY: &str = "linkLibrary";
pub const THEME_KEY: &str = "theme";

/// Where the single in-flight add currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddState {
    Idle,
    Validating,
    Fetching,
}

/// Handed out by [`LinkStore::begin_add`]; must be redeemed with
/// [`LinkStore::complete_add`]. Carries the generation it was issued under so
/// late results can be recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTicket {
    generation: u64,
    url: String,
}

impl AddTicket {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Newest-first collection of link records mirrored to durable storage.
pub struct LinkStore<S: Storage> {
    links: Vec<LinkRecord>,
    storage: S,
    key: String,
    theme: Option<Theme>,
    default_theme: Option<Theme>,
    state: AddState,
    generation: u64,
}

impl<S: Storage> LinkStore<S> {
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, LINKS_KEY)
    }

    /// Reads the collection stored under `key`. Missing or unreadable data
    /// yields an empty store.
    pub fn load_with_key(storage: S, key: &str) -> Self {
        let links = read_json::<Vec<LinkRecord>, S>(&storage, key).unwrap_or_default();
        let theme = read_json::<Theme, S>(&storage, THEME_KEY);
        debug!("Loaded {} links from {}", links.len(), key);

        Self {
            links,
            storage,
            key: key.to_string(),
            theme,
            default_theme: None,
            state: AddState::Idle,
            generation: 0,
        }
    }

    /// Theme used when nothing has been stored yet.
    pub fn with_default_theme(mut self, theme: Option<Theme>) -> Self {
        self.default_theme = theme;
        self
    }

    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&LinkRecord> {
        self.links.iter().find(|link| link.id == id)
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.links.iter().any(|link| link.url == url)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn state(&self) -> AddState {
        self.state
    }

    /// Validates `input` (surrounding whitespace ignored) and moves to
    /// `Fetching`. Nothing is mutated or fetched when this fails.
    pub fn begin_add(&mut self, input: &str) -> Result<AddTicket, AddError> {
        if self.state != AddState::Idle {
            return Err(AddError::Busy);
        }

        self.state = AddState::Validating;
        let candidate = input.trim();
        if let Err(e) = self.check_candidate(candidate) {
            self.state = AddState::Idle;
            return Err(e);
        }

        self.generation += 1;
        self.state = AddState::Fetching;
        Ok(AddTicket {
            generation: self.generation,
            url: candidate.to_string(),
        })
    }

    fn check_candidate(&self, input: &str) -> Result<(), AddError> {
        validate(input)?;
        if self.contains_url(input) {
            return Err(AddError::Duplicate);
        }
        Ok(())
    }

    /// Applies the fetch outcome for `ticket`, unless the ticket has been
    /// superseded in the meantime.
    pub fn complete_add(
        &mut self,
        ticket: AddTicket,
        outcome: Result<LinkMetadata, FetchError>,
    ) -> Result<LinkRecord, AddError> {
        if ticket.generation != self.generation || self.state != AddState::Fetching {
            debug!(
                "Dropping stale metadata for {} (generation {})",
                ticket.url, ticket.generation
            );
            return Err(AddError::Superseded);
        }
        self.state = AddState::Idle;

        let metadata = match outcome {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Metadata fetch failed for {}: {}", ticket.url, e.detail());
                return Err(AddError::Fetch(e));
            }
        };

        let record = LinkRecord::new(self.next_id(), &ticket.url, metadata);
        info!("Added {} link {}", record.category, record.url);
        self.links.insert(0, record.clone());
        self.persist_or_warn();

        Ok(record)
    }

    /// Abandons the in-flight add, if any. Its result will be discarded.
    pub fn cancel_pending(&mut self) -> bool {
        if self.state == AddState::Idle {
            return false;
        }
        self.generation += 1;
        self.state = AddState::Idle;
        true
    }

    /// Full add pipeline: validate, fetch, derive, prepend, persist.
    pub async fn add(
        &mut self,
        input: &str,
        fetcher: &dyn MetadataFetcher,
    ) -> Result<LinkRecord, AddError> {
        let ticket = self.begin_add(input)?;
        debug!("Fetching metadata via {}", fetcher.name());
        let outcome = fetcher.fetch(ticket.url()).await;
        self.complete_add(ticket, outcome)
    }

    /// Removes the record with `id`. Absent ids are not an error.
    pub fn remove(&mut self, id: u64) -> Option<LinkRecord> {
        let index = self.links.iter().position(|link| link.id == id)?;
        let removed = self.links.remove(index);
        info!("Removed link {}", removed.url);
        self.persist_or_warn();
        Some(removed)
    }

    pub fn search(&self, query: &str) -> Vec<&LinkRecord> {
        self.links.iter().filter(|link| link.matches(query)).collect()
    }

    pub fn persist(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.links).map_err(|source| StorageError::Serialize {
            key: self.key.clone(),
            source,
        })?;
        self.storage.set_item(&self.key, &json)
    }

    fn persist_or_warn(&mut self) {
        if let Err(e) = self.persist() {
            warn!("Failed to save link library: {}", e);
        }
    }

    fn next_id(&self) -> u64 {
        let now = current_millis();
        match self.links.iter().map(|link| link.id).max() {
            Some(max) if now <= max => max + 1,
            _ => now,
        }
    }

    /// Stored preference, then the configured default, then the system hint.
    pub fn theme(&self) -> Theme {
        self.theme
            .or(self.default_theme)
            .or_else(Theme::from_system)
            .unwrap_or_default()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        let json = serde_json::to_string(&theme).map_err(|source| StorageError::Serialize {
            key: THEME_KEY.to_string(),
            source,
        })?;
        self.storage.set_item(THEME_KEY, &json)?;
        self.theme = Some(theme);
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        let next = self.theme().toggle();
        self.set_theme(next)?;
        Ok(next)
    }
}

fn read_json<T, S>(storage: &S, key: &str) -> Option<T>
where
    T: serde::de::DeserializeOwned,
    S: Storage,
{
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("Nothing stored under {}", key);
            return None;
        }
        Err(e) => {
            warn!("Could not read {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring unreadable data under {}: {}", key, e);
            None
        }
    }
}
