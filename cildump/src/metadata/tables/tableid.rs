//! Metadata table identifiers.
//!
//! Every logical metadata table has a fixed id; bit *i* of the `#~` stream's valid
//! mask says whether table *i* is present, and the ids double as the order in which
//! row counts and row arrays are laid out.
//!
//! # Reference
//! - [ECMA-335 Partition II, Section 22](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use strum::{EnumCount, EnumIter};

/// Identifies a metadata table within the `#~` stream.
///
/// The discriminant of each variant is the table id defined by ECMA-335. Only
/// `Module`, `TypeRef`, `TypeDef` and `MethodDef` rows are ever walked by this
/// decoder, but the full id space matters: index widths and the row-count array are
/// keyed by every table the valid mask declares.
#[derive(Clone, Copy, PartialEq, Debug, EnumIter, EnumCount, Eq, Hash)]
pub enum TableId {
    /// `Module` table (0x00) - the one row describing the current module.
    Module = 0x00,
    /// `TypeRef` table (0x01) - references to types in external assemblies.
    TypeRef = 0x01,
    /// `TypeDef` table (0x02) - type definitions within this assembly.
    TypeDef = 0x02,
    /// `FieldPtr` table (0x03) - field indirection for edit-and-continue scenarios.
    FieldPtr = 0x03,
    /// `Field` table (0x04) - field definitions within types.
    Field = 0x04,
    /// `MethodPtr` table (0x05) - method indirection for edit-and-continue scenarios.
    MethodPtr = 0x05,
    /// `MethodDef` table (0x06) - method definitions, including each method's RVA.
    MethodDef = 0x06,
    /// `ParamPtr` table (0x07) - parameter indirection for edit-and-continue scenarios.
    ParamPtr = 0x07,
    /// `Param` table (0x08) - parameter definitions for methods.
    Param = 0x08,
    /// `InterfaceImpl` table (0x09) - interface implementations by types.
    InterfaceImpl = 0x09,
    /// `MemberRef` table (0x0A) - references to external methods and fields.
    MemberRef = 0x0A,
    /// `Constant` table (0x0B) - compile-time constant values.
    Constant = 0x0B,
    /// `CustomAttribute` table (0x0C) - custom attribute applications.
    CustomAttribute = 0x0C,
    /// `FieldMarshal` table (0x0D) - marshalling information for fields.
    FieldMarshal = 0x0D,
    /// `DeclSecurity` table (0x0E) - declarative security permissions.
    DeclSecurity = 0x0E,
    /// `ClassLayout` table (0x0F) - explicit memory layout of types.
    ClassLayout = 0x0F,
    /// `FieldLayout` table (0x10) - explicit field offsets within types.
    FieldLayout = 0x10,
    /// `StandAloneSig` table (0x11) - standalone method signatures.
    StandAloneSig = 0x11,
    /// `EventMap` table (0x12) - mapping from types to their events.
    EventMap = 0x12,
    /// `EventPtr` table (0x13) - event indirection for edit-and-continue scenarios.
    EventPtr = 0x13,
    /// `Event` table (0x14) - event definitions within types.
    Event = 0x14,
    /// `PropertyMap` table (0x15) - mapping from types to their properties.
    PropertyMap = 0x15,
    /// `PropertyPtr` table (0x16) - property indirection for edit-and-continue scenarios.
    PropertyPtr = 0x16,
    /// `Property` table (0x17) - property definitions within types.
    Property = 0x17,
    /// `MethodSemantics` table (0x18) - links getters/setters/adders to properties and events.
    MethodSemantics = 0x18,
    /// `MethodImpl` table (0x19) - explicit method implementation overrides.
    MethodImpl = 0x19,
    /// `ModuleRef` table (0x1A) - external module references.
    ModuleRef = 0x1A,
    /// `TypeSpec` table (0x1B) - instantiated generic type signatures.
    TypeSpec = 0x1B,
    /// `ImplMap` table (0x1C) - P/Invoke implementation mappings.
    ImplMap = 0x1C,
    /// `FieldRVA` table (0x1D) - field RVAs for initialized data.
    FieldRVA = 0x1D,
    /// `EncLog` table (0x1E) - edit-and-continue log.
    EncLog = 0x1E,
    /// `EncMap` table (0x1F) - edit-and-continue map.
    EncMap = 0x1F,
    /// `Assembly` table (0x20) - current assembly metadata.
    Assembly = 0x20,
    /// `AssemblyProcessor` table (0x21) - processor-specific assembly info.
    AssemblyProcessor = 0x21,
    /// `AssemblyOS` table (0x22) - OS-specific assembly info.
    AssemblyOS = 0x22,
    /// `AssemblyRef` table (0x23) - external assembly references.
    AssemblyRef = 0x23,
    /// `AssemblyRefProcessor` table (0x24) - external assembly processor info.
    AssemblyRefProcessor = 0x24,
    /// `AssemblyRefOS` table (0x25) - external assembly OS info.
    AssemblyRefOS = 0x25,
    /// `File` table (0x26) - file references in the assembly manifest.
    File = 0x26,
    /// `ExportedType` table (0x27) - types exported from this assembly.
    ExportedType = 0x27,
    /// `ManifestResource` table (0x28) - embedded or linked resources.
    ManifestResource = 0x28,
    /// `NestedClass` table (0x29) - nested type relationships.
    NestedClass = 0x29,
    /// `GenericParam` table (0x2A) - generic parameter definitions.
    GenericParam = 0x2A,
    /// `MethodSpec` table (0x2B) - instantiated generic method signatures.
    MethodSpec = 0x2B,
    /// `GenericParamConstraint` table (0x2C) - generic parameter constraints.
    GenericParamConstraint = 0x2C,
}
