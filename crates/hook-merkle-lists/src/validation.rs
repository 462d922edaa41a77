/*!
# List Validation & I/O

Readers and writers for the address lists. Every address is parsed while
reading, so a malformed entry fails the whole file rather than a later stage.
*/

use serde::{de::DeserializeOwned, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::errors::{ListError, ListResult};
use crate::schemas::{
    ChainAddressList, OwnerList, OWNER_LIST_FILE, TOKEN_LIST_FILE, YIELD_SOURCES_LIST_FILE,
};

/// The three lists, loaded together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressLists {
    pub tokens: ChainAddressList,
    pub yield_sources: ChainAddressList,
    pub owners: OwnerList,
}

impl AddressLists {
    /// Load `token_list.json`, `yield_sources_list.json` and `owner_list.json` from `dir`
    pub fn read_from_dir<P: AsRef<Path>>(dir: P) -> ListResult<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            tokens: read_token_list(dir.join(TOKEN_LIST_FILE))?,
            yield_sources: read_yield_sources_list(dir.join(YIELD_SOURCES_LIST_FILE))?,
            owners: read_owner_list(dir.join(OWNER_LIST_FILE))?,
        })
    }

    /// Write the three lists into `dir` under their standard file names
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> ListResult<()> {
        let dir = dir.as_ref();
        write_json(dir.join(TOKEN_LIST_FILE), &self.tokens)?;
        write_json(dir.join(YIELD_SOURCES_LIST_FILE), &self.yield_sources)?;
        write_json(dir.join(OWNER_LIST_FILE), &self.owners)
    }
}

// ================================================================================================
// Reading
// ================================================================================================

/// Read a token list keyed by chain id
pub fn read_token_list<P: AsRef<Path>>(path: P) -> ListResult<ChainAddressList> {
    let list: ChainAddressList = read_json(path.as_ref())?;
    debug!(
        path = %path.as_ref().display(),
        chains = list.len(),
        "Loaded token list"
    );
    Ok(list)
}

/// Read a yield source list keyed by chain id
pub fn read_yield_sources_list<P: AsRef<Path>>(path: P) -> ListResult<ChainAddressList> {
    let list: ChainAddressList = read_json(path.as_ref())?;
    debug!(
        path = %path.as_ref().display(),
        chains = list.len(),
        "Loaded yield source list"
    );
    Ok(list)
}

/// Read the flat owner list
pub fn read_owner_list<P: AsRef<Path>>(path: P) -> ListResult<OwnerList> {
    let list: OwnerList = read_json(path.as_ref())?;
    debug!(
        path = %path.as_ref().display(),
        owners = list.0.len(),
        "Loaded owner list"
    );
    Ok(list)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> ListResult<T> {
    let file = File::open(path).map_err(|source| ListError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ListError::Json {
        path: path.to_path_buf(),
        source,
    })
}

// ================================================================================================
// Writing
// ================================================================================================

/// Write any list as pretty JSON
pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, list: &T) -> ListResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ListError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, list).map_err(|source| ListError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| ListError::Io {
        path: path.to_path_buf(),
        source,
    })
}
