use std::collections::HashMap;
use std::num::NonZeroU64;

use anyhow::{Context, Result};

use crate::geometry::VertexAttribute;
use crate::math::Mat4;
use crate::shader::{ShaderProgram, ShaderSources, SlotId, UniformBlock};

use super::backend::vertex_format;

/// Compiled vertex + fragment pair with its uniform block.
///
/// Parameter slots are the members of the struct the sources bind at
/// `@group(0) @binding(0)`; names the shader does not declare have no slot.
/// Pipelines are built lazily, one per distinct set of vertex attribute
/// streams.
pub struct WgpuProgram {
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
    depth_format: Option<wgpu::TextureFormat>,

    uniforms: UniformBlock,
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pipeline_layout: wgpu::PipelineLayout,

    pipelines: HashMap<Vec<VertexAttribute>, wgpu::RenderPipeline>,
    active: bool,
}

impl WgpuProgram {
    pub fn compile(
        device: &wgpu::Device,
        sources: &ShaderSources,
        color_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Result<Self> {
        sources
            .check_entry_points()
            .context("shader sources rejected")?;
        let layout = sources
            .uniform_layout()
            .context("shader uniform block rejected")?;

        let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("primer vertex shader"),
            source: wgpu::ShaderSource::Wgsl(sources.vertex.as_str().into()),
        });
        let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("primer fragment shader"),
            source: wgpu::ShaderSource::Wgsl(sources.fragment.as_str().into()),
        });

        let uniforms = UniformBlock::new(layout);
        let size = uniforms.bytes().len() as u64;

        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("primer params ubo"),
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("primer params bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(size),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("primer params bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("primer pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        log::info!(
            "shader program compiled: {} parameters, {} byte block",
            uniforms.layout().fields().len(),
            size
        );

        Ok(Self {
            vertex,
            fragment,
            color_format,
            depth_format,
            uniforms,
            ubo,
            bind_group,
            pipeline_layout,
            pipelines: HashMap::new(),
            active: false,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn uniforms(&self) -> &UniformBlock {
        &self.uniforms
    }

    pub(super) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Uploads the uniform block if anything was written since the last flush.
    pub(super) fn flush(&mut self, queue: &wgpu::Queue) {
        if self.uniforms.take_dirty() {
            queue.write_buffer(&self.ubo, 0, self.uniforms.bytes());
        }
    }

    /// Pipeline for vertex streams bound one per slot, in `attributes` order.
    pub(super) fn pipeline_for(
        &mut self,
        device: &wgpu::Device,
        attributes: &[VertexAttribute],
    ) -> &wgpu::RenderPipeline {
        if !self.pipelines.contains_key(attributes) {
            let pipeline = self.build_pipeline(device, attributes);
            self.pipelines.insert(attributes.to_vec(), pipeline);
        }
        &self.pipelines[attributes]
    }

    fn build_pipeline(&self, device: &wgpu::Device, attributes: &[VertexAttribute]) -> wgpu::RenderPipeline {
        log::debug!("building pipeline for {} vertex streams", attributes.len());

        let attrs: Vec<[wgpu::VertexAttribute; 1]> = attributes
            .iter()
            .map(|a| {
                [wgpu::VertexAttribute {
                    format: vertex_format(a.dimensionality),
                    offset: 0,
                    shader_location: a.location,
                }]
            })
            .collect();

        let buffers: Vec<wgpu::VertexBufferLayout<'_>> = attrs
            .iter()
            .map(|a| wgpu::VertexBufferLayout {
                array_stride: a[0].format.size(),
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: a,
            })
            .collect();

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("primer mesh pipeline"),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &self.vertex,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &self.fragment,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: self.depth_format.map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}

impl ShaderProgram for WgpuProgram {
    fn find_parameter_slot(&self, name: &str) -> Option<SlotId> {
        self.uniforms.find(name)
    }

    fn activate(&mut self) {
        if !self.active {
            log::debug!("shader program activated");
        }
        self.active = true;
    }

    fn set_matrix4(&mut self, slot: SlotId, value: &Mat4) {
        self.uniforms.write_mat4(slot, value);
    }

    fn set_float(&mut self, slot: SlotId, value: f32) {
        self.uniforms.write_f32(slot, value);
    }
}
