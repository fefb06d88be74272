//! Type descriptor encoding

use crate::types::collation::collation_to_proto;
use crate::types::FieldType;
use crate::wire::WireFieldType;

/// Encode a field type into the record sent beside a wire node
///
/// Collation names missing from the collation table encode as the default
/// collation id instead of failing.
pub fn encode_field_type(ft: &FieldType) -> WireFieldType {
    WireFieldType {
        tp: ft.tp.code(),
        flag: ft.flag,
        flen: ft.flen,
        decimal: ft.decimal,
        charset: ft.charset.clone(),
        collate: collation_to_proto(&ft.collate),
    }
}

impl From<&FieldType> for WireFieldType {
    fn from(ft: &FieldType) -> Self {
        encode_field_type(ft)
    }
}
