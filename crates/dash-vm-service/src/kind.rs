/// The closed set of instance kinds the VM service reports, plus the
/// [`InstanceKind::Unknown`] sentinel for tags this build does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceKind {
    PlainInstance,
    Null,
    Bool,
    Double,
    Int,
    String,
    List,
    Map,
    Set,
    Record,
    RecordType,
    Float32x4,
    Float64x2,
    Int32x4,
    Uint8ClampedList,
    Uint8List,
    Uint16List,
    Uint32List,
    Uint64List,
    Int8List,
    Int16List,
    Int32List,
    Int64List,
    Float32List,
    Float64List,
    Int32x4List,
    Float32x4List,
    Float64x2List,
    StackTrace,
    Closure,
    MirrorReference,
    RegExp,
    WeakProperty,
    WeakReference,
    Type,
    TypeParameter,
    TypeRef,
    FunctionType,
    BoundedType,
    ReceivePort,
    UserTag,
    Finalizer,
    NativeFinalizer,
    FinalizerEntry,
    /// Sentinel for absent or unrecognized kind tags.
    Unknown,
}

impl InstanceKind {
    /// Every recognized kind, excluding the [`InstanceKind::Unknown`] sentinel.
    pub const ALL: &'static [InstanceKind] = &[
        Self::PlainInstance,
        Self::Null,
        Self::Bool,
        Self::Double,
        Self::Int,
        Self::String,
        Self::List,
        Self::Map,
        Self::Set,
        Self::Record,
        Self::RecordType,
        Self::Float32x4,
        Self::Float64x2,
        Self::Int32x4,
        Self::Uint8ClampedList,
        Self::Uint8List,
        Self::Uint16List,
        Self::Uint32List,
        Self::Uint64List,
        Self::Int8List,
        Self::Int16List,
        Self::Int32List,
        Self::Int64List,
        Self::Float32List,
        Self::Float64List,
        Self::Int32x4List,
        Self::Float32x4List,
        Self::Float64x2List,
        Self::StackTrace,
        Self::Closure,
        Self::MirrorReference,
        Self::RegExp,
        Self::WeakProperty,
        Self::WeakReference,
        Self::Type,
        Self::TypeParameter,
        Self::TypeRef,
        Self::FunctionType,
        Self::BoundedType,
        Self::ReceivePort,
        Self::UserTag,
        Self::Finalizer,
        Self::NativeFinalizer,
        Self::FinalizerEntry,
    ];

    /// The wire tag for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlainInstance => "PlainInstance",
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Double => "Double",
            Self::Int => "Int",
            Self::String => "String",
            Self::List => "List",
            Self::Map => "Map",
            Self::Set => "Set",
            Self::Record => "Record",
            Self::RecordType => "RecordType",
            Self::Float32x4 => "Float32x4",
            Self::Float64x2 => "Float64x2",
            Self::Int32x4 => "Int32x4",
            Self::Uint8ClampedList => "Uint8ClampedList",
            Self::Uint8List => "Uint8List",
            Self::Uint16List => "Uint16List",
            Self::Uint32List => "Uint32List",
            Self::Uint64List => "Uint64List",
            Self::Int8List => "Int8List",
            Self::Int16List => "Int16List",
            Self::Int32List => "Int32List",
            Self::Int64List => "Int64List",
            Self::Float32List => "Float32List",
            Self::Float64List => "Float64List",
            Self::Int32x4List => "Int32x4List",
            Self::Float32x4List => "Float32x4List",
            Self::Float64x2List => "Float64x2List",
            Self::StackTrace => "StackTrace",
            Self::Closure => "Closure",
            Self::MirrorReference => "MirrorReference",
            Self::RegExp => "RegExp",
            Self::WeakProperty => "WeakProperty",
            Self::WeakReference => "WeakReference",
            Self::Type => "Type",
            Self::TypeParameter => "TypeParameter",
            Self::TypeRef => "TypeRef",
            Self::FunctionType => "FunctionType",
            Self::BoundedType => "BoundedType",
            Self::ReceivePort => "ReceivePort",
            Self::UserTag => "UserTag",
            Self::Finalizer => "Finalizer",
            Self::NativeFinalizer => "NativeFinalizer",
            Self::FinalizerEntry => "FinalizerEntry",
            Self::Unknown => "Unknown",
        }
    }

    /// Total parse: absent or unrecognized tags map to
    /// [`InstanceKind::Unknown`] instead of failing.
    pub fn parse(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::Unknown;
        };
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == tag)
            .unwrap_or(Self::Unknown)
    }
}
