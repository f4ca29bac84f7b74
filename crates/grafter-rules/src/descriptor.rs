use std::fmt;

use grafter_tokenizer::write_quoted;

/// How a descriptor is wrapped: `[D]` is optional, `{D}` is a list and `D&`
/// extends the green node of the same type.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Attribute {
    #[default]
    Plain,
    Optional,
    List,
    Ext,
}

/// A positional placeholder, `#N` or `#N...`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Hole {
    pub index: u32,
    pub ellipsis: bool,
}

impl Hole {
    pub const fn new(index: u32) -> Self {
        Self { index, ellipsis: false }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Data {
    Hole(Hole),
    Literal(String),
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Parameter {
    Descriptor(Descriptor),
    Hole(Hole),
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Descriptor {
    /// The `0` symbol: no node at all.
    Empty,
    /// The bare `&` child: inherit the composition of the green node.
    Extension,
    Concrete(ConcreteDescriptor),
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ConcreteDescriptor {
    pub tag: Option<String>,
    /// Ordinal assigned to an untagged descriptor by its enclosing scope.
    pub label: Option<&'static str>,
    pub name: String,
    /// `None` when the source had no parentheses at all, so that `A` and `A()`
    /// render back differently.
    pub parameters: Option<Vec<Parameter>>,
    pub data: Option<Data>,
    pub attribute: Attribute,
}

impl ConcreteDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            tag: None,
            label: None,
            name: name.into(),
            parameters: None,
            data: None,
            attribute: Attribute::Plain,
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        self.parameters.as_deref().unwrap_or_default()
    }

    /// The name code generation uses for this descriptor: its tag, then its
    /// label, then its type name.
    pub fn variable_name(&self) -> &str {
        self.tag.as_deref().or(self.label).unwrap_or(self.name.as_str())
    }

    /// Tag and type only, no parameters or data.
    pub fn is_tagged_name(&self) -> bool {
        self.parameters.is_none() && self.data.is_none()
    }
}

impl Descriptor {
    pub fn concrete(name: impl Into<String>) -> Self {
        Self::Concrete(ConcreteDescriptor::new(name))
    }

    pub fn as_concrete(&self) -> Option<&ConcreteDescriptor> {
        match self {
            Self::Concrete(concrete) => Some(concrete),
            Self::Empty | Self::Extension => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.as_concrete().map(|concrete| concrete.name.as_str())
    }

    pub fn attribute(&self) -> Attribute {
        self.as_concrete().map_or(Attribute::Plain, |concrete| concrete.attribute)
    }

    /// Every hole in this descriptor, depth first, including data holes.
    pub fn holes(&self) -> Vec<Hole> {
        let mut holes = Vec::new();
        self.collect_holes(&mut holes);
        holes
    }

    fn collect_holes(&self, holes: &mut Vec<Hole>) {
        let Self::Concrete(concrete) = self else {
            return;
        };

        if let Some(Data::Hole(hole)) = &concrete.data {
            holes.push(*hole);
        }

        for parameter in concrete.parameters() {
            match parameter {
                Parameter::Hole(hole) => holes.push(*hole),
                Parameter::Descriptor(descriptor) => descriptor.collect_holes(holes),
            }
        }
    }

    /// Whether `&` appears anywhere in this descriptor, either as a bare
    /// [`Descriptor::Extension`] or as an [`Attribute::Ext`] suffix.
    pub fn contains_extension(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Extension => true,
            Self::Concrete(concrete) if concrete.attribute == Attribute::Ext => true,
            Self::Concrete(concrete) => concrete.parameters().iter().any(|parameter| {
                matches!(parameter, Parameter::Descriptor(descriptor) if descriptor.contains_extension())
            }),
        }
    }
}

impl From<ConcreteDescriptor> for Descriptor {
    fn from(concrete: ConcreteDescriptor) -> Self {
        Self::Concrete(concrete)
    }
}

impl fmt::Display for Hole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)?;
        if self.ellipsis {
            f.write_str("...")?;
        }
        Ok(())
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hole(hole) => fmt::Display::fmt(hole, f),
            Self::Literal(text) => write_quoted(f, text),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descriptor(descriptor) => fmt::Display::fmt(descriptor, f),
            Self::Hole(hole) => fmt::Display::fmt(hole, f),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("0"),
            Self::Extension => f.write_str("&"),
            Self::Concrete(concrete) => fmt::Display::fmt(concrete, f),
        }
    }
}

impl fmt::Display for ConcreteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attribute {
            Attribute::Optional => f.write_str("[")?,
            Attribute::List => f.write_str("{")?,
            Attribute::Plain | Attribute::Ext => {}
        }

        if let Some(tag) = &self.tag {
            write!(f, "{tag}@")?;
        }
        f.write_str(&self.name)?;

        if let Some(parameters) = &self.parameters {
            f.write_str("(")?;
            for (index, parameter) in parameters.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{parameter}")?;
            }
            f.write_str(")")?;
        }

        if let Some(data) = &self.data {
            write!(f, "<{data}>")?;
        }

        match self.attribute {
            Attribute::Optional => f.write_str("]"),
            Attribute::List => f.write_str("}"),
            Attribute::Ext => f.write_str("&"),
            Attribute::Plain => Ok(()),
        }
    }
}
