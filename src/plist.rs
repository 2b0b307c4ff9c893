use serde::Serialize;

/// A value to be encoded as an XML property list.
pub struct Plist<T>(pub T)
where
    T: Serialize;

impl<T> Plist<T>
where
    T: Serialize,
{
    pub fn to_xml(&self) -> Result<Vec<u8>, plist::Error> {
        let mut writer = Vec::with_capacity(128);
        plist::to_writer_xml(&mut writer, &self.0)?;
        Ok(writer)
    }
}
