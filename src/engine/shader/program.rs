use std::any::type_name;
use std::collections::HashMap;
use std::fmt;

use derive_builder::Builder;
use enum_map::EnumMap;
use glam::Vec4;
use nohash_hasher::BuildNoHashHasher;
use smartstring::alias::String;

use super::error::BindingError;
use super::io::{FragmentIo, FragmentShader, ShaderRecord, Vertex, VertexIo, VertexShader};
use super::slot::{SlotDesc, SlotRole};
use super::value::{ShaderValue, ValueKind};

/// Interpolated varyings of one fragment, keyed by vertex-record slot index.
pub type VaryingValues = HashMap<usize, ShaderValue, BuildNoHashHasher<usize>>;

type UniformStore = HashMap<String, ShaderValue>;

/// How strictly records are bound.
#[derive(Builder, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[builder(derive(Debug))]
pub struct BindingPolicy {
    /// Turn missing attributes and kind mismatches into record failures.
    #[builder(default = "false")]
    pub strict: bool,
}

/// One record field resolved to its slot index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundSlot {
    /// Field name.
    pub name:  &'static str,
    /// Position in the record's slot table.
    pub index: usize,
    /// Kind of the field.
    pub kind:  ValueKind,
}

/// The slots of one record type, grouped by role.
#[derive(Clone, Debug)]
pub struct StageLayout {
    record: &'static str,
    slots:  EnumMap<SlotRole, Vec<BoundSlot>>,
}

impl StageLayout {
    fn inspect<R: ShaderRecord>(builtins: &'static [SlotDesc]) -> Result<Self, BindingError> {
        let record = type_name::<R>();
        let mut slots: EnumMap<SlotRole, Vec<BoundSlot>> = EnumMap::default();

        for (index, desc) in R::slots().iter().enumerate() {
            if desc.name.is_empty() {
                return Err(BindingError::EmptySlotName { record });
            }
            if builtins.iter().any(|builtin| builtin.name == desc.name) {
                return Err(BindingError::ReservedSlotName { record, name: desc.name });
            }
            if R::slots()[..index].iter().any(|earlier| earlier.name == desc.name) {
                return Err(BindingError::DuplicateSlot { record, name: desc.name });
            }
            slots[desc.role].push(BoundSlot { name: desc.name, index, kind: desc.kind });
        }

        // Built-ins live outside the slot table, they carry no index.
        for desc in builtins {
            slots[SlotRole::BuiltIn].push(BoundSlot {
                name:  desc.name,
                index: usize::MAX,
                kind:  desc.kind,
            });
        }

        Ok(Self { record, slots })
    }

    /// Type name of the inspected record.
    pub fn record(&self) -> &'static str {
        self.record
    }

    /// Slots with `role`, in declaration order.
    pub fn slots(&self, role: SlotRole) -> &[BoundSlot] {
        &self.slots[role]
    }

    /// Slot with `role` and `name`.
    pub fn find(&self, role: SlotRole, name: &str) -> Option<&BoundSlot> {
        self.slots[role].iter().find(|slot| slot.name == name)
    }
}

/// A fragment varying and the vertex varying feeding it, if any.
#[derive(Copy, Clone, Debug)]
struct VaryingLink {
    slot:   BoundSlot,
    source: Option<usize>,
}

/// Binds a vertex program and a fragment program through their I/O records.
pub struct ShaderProgram<VS: VertexShader, FS: FragmentShader> {
    vertex_shader:     VS,
    fragment_shader:   FS,
    policy:            BindingPolicy,
    uniforms:          UniformStore,
    vertex_layout:     StageLayout,
    fragment_layout:   StageLayout,
    fragment_varyings: Vec<VaryingLink>,
}

impl<VS: VertexShader, FS: FragmentShader> fmt::Debug for ShaderProgram<VS, FS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("vertex_shader", &type_name::<VS>())
            .field("fragment_shader", &type_name::<FS>())
            .field("policy", &self.policy)
            .field("uniforms", &self.uniforms)
            .field("vertex_layout", &self.vertex_layout)
            .field("fragment_layout", &self.fragment_layout)
            .finish_non_exhaustive()
    }
}

impl<VS: VertexShader, FS: FragmentShader> ShaderProgram<VS, FS> {
    /// Binds with the lenient [`BindingPolicy`].
    pub fn new(vertex_shader: VS, fragment_shader: FS) -> Result<Self, BindingError> {
        Self::with_policy(vertex_shader, fragment_shader, BindingPolicy::default())
    }

    /// Inspects both records once; schema errors are returned here.
    pub fn with_policy(
        vertex_shader: VS, fragment_shader: FS, policy: BindingPolicy,
    ) -> Result<Self, BindingError> {
        let vertex_layout = StageLayout::inspect::<VS::Io>(VS::Io::builtin_slots())?;
        let fragment_layout = StageLayout::inspect::<FS::Io>(FS::Io::builtin_slots())?;

        if !fragment_layout.slots(SlotRole::Attribute).is_empty() {
            log::warn!(
                "Attribute slots of fragment I/O {} are never bound",
                fragment_layout.record()
            );
        }

        let fragment_varyings = fragment_layout
            .slots(SlotRole::Varying)
            .iter()
            .map(|slot| {
                let source = vertex_layout.find(SlotRole::Varying, slot.name);
                match source {
                    None => log::warn!(
                        "Varying input '{}' in fragment shader I/O {} has no matching varying output \
                         in vertex shader I/O {}",
                        slot.name,
                        fragment_layout.record(),
                        vertex_layout.record()
                    ),
                    Some(source) if source.kind != slot.kind => log::warn!(
                        "Varying '{}' is {:?} in {} but {:?} in {}",
                        slot.name,
                        source.kind,
                        vertex_layout.record(),
                        slot.kind,
                        fragment_layout.record()
                    ),
                    Some(_) => {},
                }
                VaryingLink { slot: *slot, source: source.map(|source| source.index) }
            })
            .collect();

        log::debug!(
            "Shader program bound: {} ({} attributes, {} uniforms, {} varyings) -> {} ({} \
             varyings, {} uniforms)",
            vertex_layout.record(),
            vertex_layout.slots(SlotRole::Attribute).len(),
            vertex_layout.slots(SlotRole::Uniform).len(),
            vertex_layout.slots(SlotRole::Varying).len(),
            fragment_layout.record(),
            fragment_layout.slots(SlotRole::Varying).len(),
            fragment_layout.slots(SlotRole::Uniform).len(),
        );

        Ok(Self {
            vertex_shader,
            fragment_shader,
            policy,
            uniforms: UniformStore::new(),
            vertex_layout,
            fragment_layout,
            fragment_varyings,
        })
    }

    /// Policy the program was bound with.
    pub fn policy(&self) -> BindingPolicy {
        self.policy
    }

    /// Slots of the vertex record by role.
    pub fn vertex_layout(&self) -> &StageLayout {
        &self.vertex_layout
    }

    /// Slots of the fragment record by role.
    pub fn fragment_layout(&self) -> &StageLayout {
        &self.fragment_layout
    }

    /// Last write wins. The value's kind is checked when it is bound.
    pub fn set_uniform(&mut self, name: &str, value: impl Into<ShaderValue>) {
        self.uniforms.insert(String::from(name), value.into());
    }

    /// Current value of a uniform.
    pub fn uniform(&self, name: &str) -> Option<ShaderValue> {
        self.uniforms.get(name).copied()
    }

    /// Forgets every uniform; slots fall back to their defaults.
    pub fn clear_uniforms(&mut self) {
        self.uniforms.clear();
    }

    /// Fresh vertex record with attributes taken from `vertex` and uniforms bound.
    pub fn create_and_prepare_vertex_io<V: Vertex>(
        &self, vertex: &V,
    ) -> Result<VS::Io, BindingError> {
        let mut io = VS::Io::instantiate()?;

        for slot in self.vertex_layout.slots(SlotRole::Attribute) {
            match vertex.attribute(slot.name) {
                Some(value) => self.assign(&mut io, slot, value)?,
                None => self.degrade(BindingError::MissingAttribute {
                    vertex: type_name::<V>(),
                    name:   slot.name,
                })?,
            }
        }

        self.bind_uniforms(&mut io, &self.vertex_layout)?;

        Ok(io)
    }

    /// Fresh fragment record with linked varyings, uniforms and `frag_coord` set.
    pub fn create_and_prepare_fragment_io(
        &self, varyings: &VaryingValues, frag_coord: Vec4,
    ) -> Result<FS::Io, BindingError> {
        let mut io = FS::Io::instantiate()?;

        for link in &self.fragment_varyings {
            let value = link.source.and_then(|source| varyings.get(&source));
            if let Some(value) = value {
                self.assign(&mut io, &link.slot, *value)?;
            }
        }

        self.bind_uniforms(&mut io, &self.fragment_layout)?;

        io.builtins_mut().frag_coord = frag_coord;

        Ok(io)
    }

    /// Runs the vertex program on `io`.
    pub fn execute_vertex_shader(&self, io: &mut VS::Io) {
        self.vertex_shader.main(io);
    }

    /// Runs the fragment program on `io`.
    pub fn execute_fragment_shader(&self, io: &mut FS::Io) {
        self.fragment_shader.main(io);
    }

    fn bind_uniforms<R: ShaderRecord>(
        &self, io: &mut R, layout: &StageLayout,
    ) -> Result<(), BindingError> {
        for slot in layout.slots(SlotRole::Uniform) {
            match self.uniforms.get(slot.name) {
                Some(value) => self.assign(io, slot, *value)?,
                None => log::trace!("Uniform '{}' not set, {} keeps its default", slot.name, layout.record()),
            }
        }
        Ok(())
    }

    fn assign<R: ShaderRecord>(
        &self, io: &mut R, slot: &BoundSlot, value: ShaderValue,
    ) -> Result<(), BindingError> {
        match io.write_slot(slot.index, value) {
            Ok(()) => Ok(()),
            Err(found) => self.degrade(BindingError::TypeMismatch {
                record: type_name::<R>(),
                name: slot.name,
                expected: slot.kind,
                found,
            }),
        }
    }

    fn degrade(&self, err: BindingError) -> Result<(), BindingError> {
        if self.policy.strict {
            return Err(err);
        }
        log::warn!("{err}, skipping");
        Ok(())
    }
}
