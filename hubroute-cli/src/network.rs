//! Loading a network snapshot from disk with capability-based IO.

use std::io::{self, BufReader};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use hubroute_core::{MemoryNetwork, NetworkSnapshot};

use crate::CliError;

/// Open `path`'s parent directory and return it with the file name.
fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("network path should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Check that `path` names an existing regular file.
pub(crate) fn require_network_file(path: &Utf8Path) -> Result<(), CliError> {
    let is_file = open_dir_and_file(path)
        .and_then(|(dir, name)| dir.metadata(name.as_str()))
        .map(|meta| meta.is_file());
    match is_file {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::NetworkPathNotFile {
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            Err(CliError::MissingNetworkFile {
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::OpenNetwork {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read and validate the JSON network snapshot at `path`.
pub(crate) fn load_network(path: &Utf8Path) -> Result<MemoryNetwork, CliError> {
    require_network_file(path)?;
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenNetwork {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let network = NetworkSnapshot::from_reader(BufReader::new(file))
        .and_then(NetworkSnapshot::into_network)
        .map_err(|source| CliError::LoadNetwork {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!("loaded {} nodes from {path}", network.nodes().count());
    Ok(network)
}
