use super::{
    FieldCodec, TypeCodec,
    naming::{self, Paths},
};
use crate::{
    classify::{ElementClass, EmptyValue, FieldClass, Materialization, OptionRepr, WireClass},
    emit::EmitError,
    resolve::ValueKind,
};
use compgen_schema::{node::CommandDefinition, types::ScalarKind};
use proc_macro2::{Ident, Literal, TokenStream};
use quote::{format_ident, quote};

/// Tokens for one resolved type: struct, inherent impl, wire codec,
/// equality/hash and, for components, the component surface.
pub fn emit_type(codec: &TypeCodec, paths: &Paths) -> Result<TokenStream, EmitError> {
    let emitter = TypeEmitter::new(codec, paths)?;
    let rt = paths.runtime();

    // wire methods are called on `U::Object`, so the traits must be in scope
    let mut tokens = quote! {
        #[allow(unused_imports)]
        use #rt::{SchemaObject as _, SchemaUpdate as _};
    };
    tokens.extend(emitter.struct_def());
    tokens.extend(emitter.inherent()?);
    tokens.extend(emitter.schema_type()?);
    tokens.extend(emitter.eq_hash());

    if codec.component_id().is_some() {
        tokens.extend(emitter.component()?);
        tokens.extend(emitter.commands()?);
        if codec.supports_updates() {
            tokens.extend(emitter.update_builder()?);
        }
    }

    Ok(tokens)
}

///
/// FieldParts
///

struct FieldParts<'a> {
    codec: &'a FieldCodec,
    ident: Ident,
    id_const: Ident,
    ty: TokenStream,
}

impl FieldParts<'_> {
    fn id(&self) -> TokenStream {
        let id_const = &self.id_const;

        quote!(Self::#id_const)
    }

    const fn class(&self) -> &FieldClass {
        &self.codec.class
    }
}

///
/// TypeEmitter
///

struct TypeEmitter<'a> {
    codec: &'a TypeCodec,
    paths: &'a Paths<'a>,
    rt: &'a syn::Path,
    ident: Ident,
    fields: Vec<FieldParts<'a>>,
}

impl<'a> TypeEmitter<'a> {
    fn new(codec: &'a TypeCodec, paths: &'a Paths<'a>) -> Result<Self, EmitError> {
        let fields = codec
            .fields
            .iter()
            .map(|f| {
                Ok(FieldParts {
                    codec: f,
                    ident: naming::field_ident(f.name())?,
                    id_const: naming::field_id_const(f.name())?,
                    ty: field_type(paths, &f.class)?,
                })
            })
            .collect::<Result<Vec<_>, EmitError>>()?;

        Ok(Self {
            codec,
            paths,
            rt: paths.runtime(),
            ident: naming::type_ident(&codec.ty.name)?,
            fields,
        })
    }

    fn idents(&self) -> impl Iterator<Item = &Ident> {
        self.fields.iter().map(|f| &f.ident)
    }

    //
    // struct
    //

    fn struct_def(&self) -> TokenStream {
        let ty = &self.codec.ty;
        let ident = &self.ident;

        let mut docs = vec![format!(
            " Generated from {}({},{})",
            ty.source.canonical_path, ty.position.line, ty.position.column
        )];
        if !ty.omitted.is_empty() {
            docs.push(String::new());
            docs.extend(
                ty.omitted
                    .iter()
                    .map(|name| format!(" Recursive field `{name}` omitted.")),
            );
        }

        let fields = self.fields.iter().map(|f| {
            let (name, ty) = (&f.ident, &f.ty);
            quote!(pub #name: #ty)
        });

        quote! {
            #(#[doc = #docs])*
            #[derive(Clone, Debug, Default)]
            pub struct #ident {
                #(#fields,)*
            }
        }
    }

    //
    // inherent impl
    //

    fn inherent(&self) -> Result<TokenStream, EmitError> {
        let rt = self.rt;
        let ident = &self.ident;

        let consts = self.fields.iter().map(|f| {
            let id_const = &f.id_const;
            let id = Literal::u32_unsuffixed(f.codec.id());
            quote!(pub const #id_const: #rt::FieldId = #id;)
        });

        let params = self.fields.iter().map(|f| {
            let (name, ty) = (&f.ident, &f.ty);
            quote!(#name: #ty)
        });
        let idents = self.idents();

        let mut extra = quote!();
        if self.codec.supports_updates() {
            for f in &self.fields {
                extra.extend(self.updater(f)?);
            }
        }
        if self.codec.component_id().is_some() {
            extra.extend(self.event_accessors()?);
            extra.extend(self.command_fns()?);
        }

        Ok(quote! {
            impl #ident {
                #(#consts)*

                #[allow(clippy::too_many_arguments)]
                #[must_use]
                pub fn new(#(#params),*) -> Self {
                    Self { #(#idents),* }
                }

                #extra
            }
        })
    }

    //
    // SchemaType
    //

    fn schema_type(&self) -> Result<TokenStream, EmitError> {
        let rt = self.rt;
        let ident = &self.ident;
        let qualified = self.codec.qualified_name();
        let obj = quote!(fields);

        let decode = if self.fields.is_empty() {
            quote! {
                let _ = fields;
                ::core::result::Result::Ok(Self {})
            }
        } else {
            let inits = self
                .fields
                .iter()
                .map(|f| {
                    let name = &f.ident;
                    let id = f.id();
                    let value = decode_field(self.paths, f.codec, &obj, &id)?;

                    Ok(if let FieldClass::Singular(_) = f.class() {
                        let count = format_ident!("{}", f.class().field_ops().count);
                        let field_name = f.codec.name();
                        quote! {
                            #name: {
                                if fields.#count(#id) == 0 {
                                    return ::core::result::Result::Err(#rt::DecodeError::MissingField {
                                        type_name: #qualified.to_string(),
                                        field: #field_name.to_string(),
                                        field_id: #id,
                                    });
                                }
                                #value
                            }
                        }
                    } else {
                        quote!(#name: #value)
                    })
                })
                .collect::<Result<Vec<_>, EmitError>>()?;

            quote!(::core::result::Result::Ok(Self { #(#inits,)* }))
        };

        let encode = if self.fields.is_empty() {
            quote!(let _ = fields;)
        } else {
            let parts = self.fields.iter().map(|f| {
                let name = &f.ident;
                encode_field(rt, f.class(), &obj, &f.id(), &quote!(self.#name))
            });
            quote!(#(#parts)*)
        };

        let payload = if self.codec.ty.command_payload {
            quote!(impl #rt::CommandPayload for #ident {})
        } else {
            quote!()
        };

        Ok(quote! {
            impl #rt::SchemaType for #ident {
                const SCHEMA_NAME: &'static str = #qualified;

                fn from_schema<O: #rt::SchemaObject>(
                    fields: &O,
                ) -> ::core::result::Result<Self, #rt::DecodeError> {
                    #decode
                }

                fn apply_to_schema<O: #rt::SchemaObject>(&self, fields: &mut O) {
                    #encode
                }
            }

            #payload
        })
    }

    //
    // equality / hash
    //

    fn eq_hash(&self) -> TokenStream {
        let rt = self.rt;
        let ident = &self.ident;

        let (eq_body, hash_body) = if self.fields.is_empty() {
            (quote!(let _ = other; true), quote!(let _ = state;))
        } else {
            let eqs = self
                .idents()
                .map(|f| quote!(#rt::SchemaEq::schema_eq(&self.#f, &other.#f)));
            let hashes = self
                .idents()
                .map(|f| quote!(#rt::SchemaHash::schema_hash(&self.#f, state);));

            (quote!(#(#eqs)&&*), quote!(#(#hashes)*))
        };

        quote! {
            impl #rt::SchemaEq for #ident {
                fn schema_eq(&self, other: &Self) -> bool {
                    #eq_body
                }
            }

            impl #rt::SchemaHash for #ident {
                fn schema_hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                    #hash_body
                }
            }

            impl ::core::cmp::PartialEq for #ident {
                fn eq(&self, other: &Self) -> bool {
                    #rt::SchemaEq::schema_eq(self, other)
                }
            }

            impl ::core::cmp::Eq for #ident {}

            impl ::core::hash::Hash for #ident {
                fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                    #rt::SchemaHash::schema_hash(self, state);
                }
            }
        }
    }

    //
    // component
    //

    fn component(&self) -> Result<TokenStream, EmitError> {
        let rt = self.rt;
        let ident = &self.ident;
        let component_id = Literal::u32_unsuffixed(self.codec.component_id().unwrap_or_default());
        let obj = quote!(fields);

        let body = if self.fields.is_empty() {
            quote! {
                let _ = update;
                ::core::result::Result::Ok(::core::clone::Clone::clone(self))
            }
        } else {
            let merges = self
                .fields
                .iter()
                .map(|f| {
                    let name = &f.ident;
                    let id = f.id();
                    let count = format_ident!("{}", f.class().field_ops().count);
                    let value = decode_field(self.paths, f.codec, &obj, &id)?;
                    let empty = empty_value(f.class().empty());

                    Ok(quote! {
                        if fields.#count(#id) > 0 {
                            next.#name = #value;
                        } else if update.is_cleared(#id) {
                            next.#name = #empty;
                        }
                    })
                })
                .collect::<Result<Vec<_>, EmitError>>()?;

            quote! {
                let fields = update.fields();
                let mut next = ::core::clone::Clone::clone(self);
                #(#merges)*

                ::core::result::Result::Ok(next)
            }
        };

        Ok(quote! {
            impl #rt::Component for #ident {
                const COMPONENT_ID: #rt::ComponentId = #component_id;

                fn apply_update<U: #rt::SchemaUpdate>(
                    &self,
                    update: &U,
                ) -> ::core::result::Result<Self, #rt::DecodeError> {
                    #body
                }
            }
        })
    }

    // updater
    // update_<field>: write the value, or mark the field cleared
    fn updater(&self, f: &FieldParts) -> Result<TokenStream, EmitError> {
        let rt = self.rt;
        let name = naming::prefixed("update_", f.codec.name())?;
        let id = f.id();
        let obj = quote!(fields);

        let (param, body) = match f.class() {
            FieldClass::Singular(e) => {
                let enc = encode_element(rt, e, &obj, &id, &element_ref(e));
                (
                    param_type(self.paths, e)?,
                    quote! {
                        let fields = update.fields_mut();
                        #enc
                    },
                )
            }
            FieldClass::Option { element, .. } => {
                let enc = encode_element(rt, element, &obj, &id, &element_ref(element));
                let inner = param_type(self.paths, element)?;
                (
                    quote!(::core::option::Option<#inner>),
                    quote! {
                        match value {
                            ::core::option::Option::Some(value) => {
                                let fields = update.fields_mut();
                                #enc
                            }
                            ::core::option::Option::None => update.add_cleared_field(#id),
                        }
                    },
                )
            }
            FieldClass::List { .. } | FieldClass::Map { .. } => {
                let ty = &f.ty;
                let enc = encode_field(rt, f.class(), &obj, &id, &quote!((*value)));
                (
                    quote!(&#ty),
                    quote! {
                        if value.is_empty() {
                            update.add_cleared_field(#id);
                        } else {
                            let fields = update.fields_mut();
                            #enc
                        }
                    },
                )
            }
        };

        Ok(quote! {
            pub fn #name<U: #rt::SchemaUpdate>(update: &mut U, value: #param) {
                #body
            }
        })
    }

    // event_accessors
    // <event>_events: every event of one index, in update order
    fn event_accessors(&self) -> Result<TokenStream, EmitError> {
        let rt = self.rt;
        let mut tokens = quote!();

        for event in &self.codec.ty.events {
            let name = naming::suffixed(&event.name, "_events")?;
            let payload = self.paths.type_path(&event.payload_type)?;
            let index = Literal::u32_unsuffixed(event.event_index);
            let event_name = event.name.as_str();

            tokens.extend(quote! {
                pub fn #name<U: #rt::SchemaUpdate>(
                    update: &U,
                ) -> ::core::result::Result<::std::vec::Vec<#payload>, #rt::DecodeError> {
                    let events = update.events();
                    let count = events.object_count(#index);
                    let mut out = ::std::vec::Vec::with_capacity(count as usize);
                    for i in 0..count {
                        out.push(
                            <#payload as #rt::SchemaType>::from_schema(events.index_object(#index, i))
                                .map_err(|err| err.with_field(#event_name))?,
                        );
                    }

                    ::core::result::Result::Ok(out)
                }
            });
        }

        Ok(tokens)
    }

    // command_fns
    // command_kind plus the request (and response) senders
    fn command_fns(&self) -> Result<TokenStream, EmitError> {
        let rt = self.rt;
        let commands = &self.codec.ty.commands;
        if commands.is_empty() {
            return Ok(quote!());
        }

        let mut tokens = quote! {
            #[must_use]
            pub const fn command_kind(
                component_id: #rt::ComponentId,
                command_index: #rt::CommandIndex,
            ) -> ::core::option::Option<Commands> {
                if component_id == <Self as #rt::Component>::COMPONENT_ID {
                    Commands::from_index(command_index)
                } else {
                    ::core::option::Option::None
                }
            }
        };

        for command in commands {
            let variant = naming::variant_ident(&command.name)?;
            let send_request = send_fn(command, "_request")?;
            let request = self.paths.type_path(&command.request_type)?;

            tokens.extend(quote! {
                pub fn #send_request<T: #rt::CommandTransport>(
                    transport: &mut T,
                    entity_id: #rt::EntityId,
                    request: &#request,
                ) -> #rt::RequestId {
                    transport.send_command_request(
                        entity_id,
                        <Self as #rt::Component>::COMPONENT_ID,
                        Commands::#variant.index(),
                        #rt::SchemaType::to_schema(request),
                    )
                }
            });

            if self.codec.supports_updates() {
                let send_response = send_fn(command, "_response")?;
                let response = self.paths.type_path(&command.response_type)?;

                tokens.extend(quote! {
                    pub fn #send_response<T: #rt::CommandTransport>(
                        transport: &mut T,
                        request_id: #rt::RequestId,
                        response: &#response,
                    ) {
                        transport.send_command_response(
                            request_id,
                            <Self as #rt::Component>::COMPONENT_ID,
                            Commands::#variant.index(),
                            #rt::SchemaType::to_schema(response),
                        );
                    }
                });
            }
        }

        Ok(tokens)
    }

    // commands
    // the Commands index enum and the entity-bound CommandBinding
    fn commands(&self) -> Result<TokenStream, EmitError> {
        let rt = self.rt;
        let ident = &self.ident;
        let commands = &self.codec.ty.commands;
        if commands.is_empty() {
            return Ok(quote!());
        }

        let variants = commands
            .iter()
            .map(|c| naming::variant_ident(&c.name))
            .collect::<Result<Vec<_>, _>>()?;
        let indexes: Vec<_> = commands
            .iter()
            .map(|c| Literal::u32_unsuffixed(c.command_index))
            .collect();

        let bindings = commands
            .iter()
            .map(|c| {
                let method = naming::field_ident(&c.name)?;
                let send_request = send_fn(c, "_request")?;
                let request = self.paths.type_path(&c.request_type)?;

                Ok(quote! {
                    pub fn #method(&mut self, request: &#request) -> #rt::RequestId {
                        #ident::#send_request(&mut *self.transport, self.entity_id, request)
                    }
                })
            })
            .collect::<Result<Vec<_>, EmitError>>()?;

        Ok(quote! {
            #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
            #[repr(u32)]
            pub enum Commands {
                #(#variants = #indexes,)*
            }

            impl Commands {
                pub const ALL: &'static [Self] = &[#(Self::#variants),*];

                #[must_use]
                pub const fn index(self) -> #rt::CommandIndex {
                    self as #rt::CommandIndex
                }

                #[must_use]
                pub const fn from_index(index: #rt::CommandIndex) -> ::core::option::Option<Self> {
                    match index {
                        #(#indexes => ::core::option::Option::Some(Self::#variants),)*
                        _ => ::core::option::Option::None,
                    }
                }
            }

            pub struct CommandBinding<'a, T: #rt::CommandTransport> {
                transport: &'a mut T,
                entity_id: #rt::EntityId,
            }

            impl<'a, T: #rt::CommandTransport> CommandBinding<'a, T> {
                pub fn new(transport: &'a mut T, entity_id: #rt::EntityId) -> Self {
                    Self { transport, entity_id }
                }

                #[must_use]
                pub const fn entity_id(&self) -> #rt::EntityId {
                    self.entity_id
                }

                #(#bindings)*
            }
        })
    }

    // update_builder
    // <Name>Update: accumulates field writes and events, then serializes
    fn update_builder(&self) -> Result<TokenStream, EmitError> {
        let rt = self.rt;
        let ident = &self.ident;
        let builder = naming::type_ident(&format!("{}Update", self.codec.ty.name))?;

        let mut members = Vec::new();
        let mut setters = Vec::new();
        let mut empties = Vec::new();
        let mut applies = Vec::new();

        for f in &self.fields {
            let (name, ty) = (&f.ident, &f.ty);
            let setter = naming::prefixed("set_", f.codec.name())?;
            let updater = naming::prefixed("update_", f.codec.name())?;
            let arg = updater_arg(f.class());

            members.push(quote!(pub #name: ::core::option::Option<#ty>));
            setters.push(quote! {
                pub fn #setter(&mut self, value: #ty) -> &mut Self {
                    self.#name = ::core::option::Option::Some(value);
                    self
                }
            });
            empties.push(quote!(self.#name.is_none()));
            applies.push(quote! {
                if let ::core::option::Option::Some(value) = &self.#name {
                    #ident::#updater(update, #arg);
                }
            });
        }

        for event in &self.codec.ty.events {
            let name = naming::suffixed(&event.name, "_events")?;
            let adder = naming::prefixed("add_", &event.name)?;
            let payload = self.paths.type_path(&event.payload_type)?;
            let index = Literal::u32_unsuffixed(event.event_index);

            members.push(quote!(pub #name: ::std::vec::Vec<#payload>));
            setters.push(quote! {
                pub fn #adder(&mut self, event: #payload) -> &mut Self {
                    self.#name.push(event);
                    self
                }
            });
            empties.push(quote!(self.#name.is_empty()));
            applies.push(quote! {
                for event in &self.#name {
                    #rt::SchemaType::apply_to_schema(event, update.events_mut().add_object(#index));
                }
            });
        }

        let is_empty = if empties.is_empty() {
            quote!(true)
        } else {
            quote!(#(#empties)&&*)
        };
        let apply_body = if applies.is_empty() {
            quote!(let _ = update;)
        } else {
            quote!(#(#applies)*)
        };

        Ok(quote! {
            #[derive(Clone, Debug, Default)]
            pub struct #builder {
                #(#members,)*
            }

            impl #builder {
                #[must_use]
                pub fn new() -> Self {
                    Self::default()
                }

                #(#setters)*

                #[must_use]
                pub fn is_empty(&self) -> bool {
                    #is_empty
                }

                pub fn apply_to<U: #rt::SchemaUpdate>(&self, update: &mut U) {
                    #apply_body
                }

                #[must_use]
                pub fn to_update<U: #rt::SchemaUpdate + ::core::default::Default>(&self) -> U {
                    let mut update = U::default();
                    self.apply_to(&mut update);

                    update
                }
            }
        })
    }
}

//
// shared helpers
//

// send_fn
fn send_fn(command: &CommandDefinition, suffix: &str) -> Result<Ident, EmitError> {
    naming::ident(&format!("send_{}{suffix}", naming::snake(&command.name)))
}

// scalar_type
fn scalar_type(kind: ScalarKind, rt: &syn::Path) -> TokenStream {
    match kind {
        ScalarKind::Bool => quote!(bool),
        ScalarKind::Bytes => quote!(::std::vec::Vec<u8>),
        ScalarKind::Double => quote!(f64),
        ScalarKind::EntityId => quote!(#rt::EntityId),
        ScalarKind::Float => quote!(f32),
        ScalarKind::Int32 | ScalarKind::Sint32 | ScalarKind::Sfixed32 => quote!(i32),
        ScalarKind::Int64 | ScalarKind::Sint64 | ScalarKind::Sfixed64 => quote!(i64),
        ScalarKind::String => quote!(::std::string::String),
        ScalarKind::Uint32 | ScalarKind::Fixed32 => quote!(u32),
        ScalarKind::Uint64 | ScalarKind::Fixed64 => quote!(u64),
    }
}

// element_type
fn element_type(paths: &Paths, element: &ElementClass) -> Result<TokenStream, EmitError> {
    match &element.kind {
        ValueKind::Scalar(kind) => Ok(scalar_type(*kind, paths.runtime())),
        ValueKind::Enum(name) | ValueKind::Named(name) => paths.type_path(name),
    }
}

// field_type
fn field_type(paths: &Paths, class: &FieldClass) -> Result<TokenStream, EmitError> {
    let rt = paths.runtime();

    Ok(match class {
        FieldClass::Singular(e) => element_type(paths, e)?,
        FieldClass::Option { element, .. } => {
            let inner = element_type(paths, element)?;
            quote!(::core::option::Option<#inner>)
        }
        FieldClass::List {
            element,
            materialization,
        } => {
            let inner = element_type(paths, element)?;
            match materialization {
                Materialization::Persistent => quote!(#rt::List<#inner>),
                Materialization::Growable => quote!(::std::vec::Vec<#inner>),
            }
        }
        FieldClass::Map {
            key,
            value,
            materialization,
        } => {
            let (k, v) = (element_type(paths, key)?, element_type(paths, value)?);
            match materialization {
                Materialization::Persistent => quote!(#rt::Map<#k, #v>),
                Materialization::Growable => quote!(#rt::MapBuf<#k, #v>),
            }
        }
    })
}

// param_type
// updater parameter for one element: borrowed kinds by reference
fn param_type(paths: &Paths, element: &ElementClass) -> Result<TokenStream, EmitError> {
    Ok(match &element.kind {
        ValueKind::Scalar(ScalarKind::String) => quote!(&str),
        ValueKind::Scalar(ScalarKind::Bytes) => quote!(&[u8]),
        ValueKind::Named(name) => {
            let path = paths.type_path(name)?;
            quote!(&#path)
        }
        ValueKind::Scalar(_) | ValueKind::Enum(_) => element_type(paths, element)?,
    })
}

// element_ref
// a reference to the updater's `value` binding
fn element_ref(element: &ElementClass) -> TokenStream {
    if element.is_borrowed() {
        quote!(value)
    } else {
        quote!(&value)
    }
}

// updater_arg
// converts a builder's `value: &FieldType` into the updater parameter
fn updater_arg(class: &FieldClass) -> TokenStream {
    match class {
        FieldClass::Singular(e) if e.is_borrowed() => quote!(value),
        FieldClass::Singular(_) => quote!(*value),
        FieldClass::Option {
            repr: OptionRepr::NullReference,
            ..
        } => quote!(value.as_deref()),
        FieldClass::Option { element, .. } if element.is_borrowed() => quote!(value.as_ref()),
        FieldClass::Option { .. } => quote!(*value),
        FieldClass::List { .. } | FieldClass::Map { .. } => quote!(value),
    }
}

// empty_value
fn empty_value(empty: EmptyValue) -> TokenStream {
    match empty {
        EmptyValue::Zero | EmptyValue::EmptyCollection => quote!(::core::default::Default::default()),
        EmptyValue::Absent => quote!(::core::option::Option::None),
    }
}

// encode_element
// `value` is an expression of type `&Element` (or `&str` / `&[u8]`)
fn encode_element(
    rt: &syn::Path,
    element: &ElementClass,
    obj: &TokenStream,
    id: &TokenStream,
    value: &TokenStream,
) -> TokenStream {
    let add = format_ident!("{}", element.ops.add);

    match element.wire {
        WireClass::Scalar(kind) if kind.is_copy() => quote!(#obj.#add(#id, *#value);),
        WireClass::Scalar(_) => quote!(#obj.#add(#id, #value);),
        WireClass::Enum => quote!(#obj.#add(#id, #rt::WireEnum::to_wire(*#value));),
        WireClass::Object => quote!(#rt::SchemaType::apply_to_schema(#value, #obj.#add(#id));),
    }
}

// encode_field
// `place` names the field value, e.g. `self.coords`
fn encode_field(
    rt: &syn::Path,
    class: &FieldClass,
    obj: &TokenStream,
    id: &TokenStream,
    place: &TokenStream,
) -> TokenStream {
    match class {
        FieldClass::Singular(e) => encode_element(rt, e, obj, id, &quote!(&#place)),
        FieldClass::Option { element, .. } => {
            let enc = encode_element(rt, element, obj, id, &quote!(value));
            quote! {
                if let ::core::option::Option::Some(value) = &#place {
                    #enc
                }
            }
        }
        FieldClass::List { element, .. } => {
            let enc = encode_element(rt, element, obj, id, &quote!(value));
            quote! {
                for value in #place.iter() {
                    #enc
                }
            }
        }
        FieldClass::Map { key, value, .. } => {
            let pair = quote!(pair);
            let enc_key = encode_element(rt, key, &pair, &quote!(#rt::MAP_KEY_FIELD_ID), &quote!(key));
            let enc_value = encode_element(
                rt,
                value,
                &pair,
                &quote!(#rt::MAP_VALUE_FIELD_ID),
                &quote!(value),
            );
            quote! {
                for (key, value) in #place.iter() {
                    let pair = #obj.add_object(#id);
                    #enc_key
                    #enc_value
                }
            }
        }
    }
}

// decode_element
// reads the last value (`index` = None) or the n-th value
fn decode_element(
    paths: &Paths,
    element: &ElementClass,
    obj: &TokenStream,
    id: &TokenStream,
    index: Option<&TokenStream>,
    field_name: &str,
) -> Result<TokenStream, EmitError> {
    let rt = paths.runtime();
    let raw = match index {
        None => {
            let get = format_ident!("{}", element.ops.get);
            quote!(#obj.#get(#id))
        }
        Some(i) => {
            let op = format_ident!("{}", element.ops.index);
            quote!(#obj.#op(#id, #i))
        }
    };

    Ok(match &element.kind {
        ValueKind::Scalar(ScalarKind::String) => quote!(#raw.to_owned()),
        ValueKind::Scalar(ScalarKind::Bytes) => quote!(#raw.to_vec()),
        ValueKind::Scalar(_) => raw,
        ValueKind::Enum(name) => {
            let path = paths.type_path(name)?;
            quote!(<#path as #rt::WireEnum>::from_wire(#raw).map_err(|err| err.with_field(#field_name))?)
        }
        ValueKind::Named(name) => {
            let path = paths.type_path(name)?;
            quote!(<#path as #rt::SchemaType>::from_schema(#raw).map_err(|err| err.with_field(#field_name))?)
        }
    })
}

// decode_field
// an expression of the field's type; singular presence is checked by the caller
fn decode_field(
    paths: &Paths,
    field: &FieldCodec,
    obj: &TokenStream,
    id: &TokenStream,
) -> Result<TokenStream, EmitError> {
    let rt = paths.runtime();
    let name = field.name();
    let count = format_ident!("{}", field.class.field_ops().count);

    Ok(match &field.class {
        FieldClass::Singular(e) => decode_element(paths, e, obj, id, None, name)?,
        FieldClass::Option { element, .. } => {
            let get = decode_element(paths, element, obj, id, None, name)?;
            quote! {
                if #obj.#count(#id) > 0 {
                    ::core::option::Option::Some(#get)
                } else {
                    ::core::option::Option::None
                }
            }
        }
        FieldClass::List {
            element,
            materialization,
        } => {
            let item = decode_element(paths, element, obj, id, Some(&quote!(i)), name)?;
            let freeze = match materialization {
                Materialization::Persistent => quote!(#rt::List::from(items)),
                Materialization::Growable => quote!(items),
            };
            quote! {
                {
                    let count = #obj.#count(#id);
                    let mut items = ::std::vec::Vec::with_capacity(count as usize);
                    for i in 0..count {
                        items.push(#item);
                    }
                    #freeze
                }
            }
        }
        FieldClass::Map {
            key,
            value,
            materialization,
        } => {
            let pair = quote!(pair);
            let k = decode_element(paths, key, &pair, &quote!(#rt::MAP_KEY_FIELD_ID), None, name)?;
            let v = decode_element(
                paths,
                value,
                &pair,
                &quote!(#rt::MAP_VALUE_FIELD_ID),
                None,
                name,
            )?;
            let freeze = match materialization {
                Materialization::Persistent => quote!(entries.freeze()),
                Materialization::Growable => quote!(entries),
            };
            quote! {
                {
                    let count = #obj.#count(#id);
                    let mut entries = #rt::MapBuf::with_capacity(count as usize);
                    for i in 0..count {
                        let pair = #obj.index_object(#id, i);
                        entries.insert(#k, #v);
                    }
                    #freeze
                }
            }
        }
    })
}
