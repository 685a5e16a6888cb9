// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! XDF file detection by magic number.
//!
//! Used before appending to an existing file, and by the `check` command.
//!
//! # Example
//!
//! ```rust,no_run
//! use xdfcodec::io::detection::is_xdf_file;
//!
//! if is_xdf_file("session.xdf") {
//!     println!("XDF file detected");
//! }
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::core::{Result, XdfError};
use crate::io::formats::xdf::constants::XDF_MAGIC;

/// Read the first bytes of `reader` and report whether they are the XDF
/// magic. Streams shorter than the magic are not XDF.
pub fn has_magic<R: Read>(reader: &mut R) -> io::Result<bool> {
    let mut header = [0u8; XDF_MAGIC.len()];
    let mut filled = 0;
    while filled < header.len() {
        match reader.read(&mut header[filled..]) {
            Ok(0) => return Ok(false),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(header == XDF_MAGIC)
}

/// Verify that `path` starts with the XDF magic.
///
/// Fails with [`XdfError::BadMagic`] if it does not, or with an I/O error if
/// the file cannot be read.
pub fn check_magic<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::open(path)
        .map_err(|e| XdfError::io(format!("opening {}", path.display()), e))?;
    let found = has_magic(&mut file)
        .map_err(|e| XdfError::io(format!("reading header of {}", path.display()), e))?;
    if found {
        Ok(())
    } else {
        Err(XdfError::BadMagic {
            path: path.display().to_string(),
        })
    }
}

/// Check if a file is an XDF file. Unreadable files are not.
pub fn is_xdf_file<P: AsRef<Path>>(path: P) -> bool {
    check_magic(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn create_temp_file(name: &str, data: &[u8]) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "xdfcodec_test_detect_{}_{}.xdf",
            std::process::id(),
            name
        ));
        {
            let mut temp_file = File::create(&path).unwrap();
            temp_file.write_all(data).unwrap();
            temp_file.flush().unwrap();
        }
        path
    }

    #[test]
    fn test_has_magic() {
        assert!(has_magic(&mut Cursor::new(b"XDF:\x01\x02")).unwrap());
        assert!(!has_magic(&mut Cursor::new(b"XDF")).unwrap());
        assert!(!has_magic(&mut Cursor::new(b"#ROSBAG V2.0")).unwrap());
        assert!(!has_magic(&mut Cursor::new(Vec::<u8>::new())).unwrap());
    }

    #[test]
    fn test_check_magic_ok() {
        let path = create_temp_file("ok", b"XDF:rest");
        assert!(check_magic(&path).is_ok());
        assert!(is_xdf_file(&path));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_check_magic_bad() {
        let path = create_temp_file("bad", b"not an xdf file");
        let err = check_magic(&path).unwrap_err();
        assert!(matches!(err, XdfError::BadMagic { .. }));
        assert!(!is_xdf_file(&path));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("xdfcodec_test_detect_does_not_exist.xdf");
        assert!(matches!(check_magic(&path), Err(XdfError::Io { .. })));
        assert!(!is_xdf_file(&path));
    }
}
