use crate::error::Error;

/// XOR checksum of a sentence body, that is every byte between
/// the start delimiter and the `*` checksum delimiter.
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |ck, b| ck ^ b)
}

/// Verifies `body` against the hexadecimal `field` that followed `*`.
pub fn verify(body: &str, field: &str) -> Result<(), Error> {
    let field = field.trim();

    if field.len() != 2 {
        return Err(Error::ChecksumFormat(field.to_string()));
    }

    let found =
        u8::from_str_radix(field, 16).map_err(|_| Error::ChecksumFormat(field.to_string()))?;

    let expected = checksum(body);

    if found == expected {
        Ok(())
    } else {
        Err(Error::ChecksumMismatch { expected, found })
    }
}
